//! Static HTML report for a [`FamilyTree`].
//!
//! The page is self-contained: the stylesheet is embedded and people and
//! families link to each other through `#I<n>` / `#F<n>` anchors.

use chrono::NaiveDate;

use crate::config::ReportOptions;
use crate::model::{EventInfo, Family, FamilyMembership, FamilyPosition, FamilyTree, Individual};

const STYLESHEET: &str = include_str!("style.css");

/// Format used for the "generated on" line, e.g. `05 March 2024`.
pub const GENERATED_DATE_FORMAT: &str = "%d %B %Y";

/// Render the whole report.
pub fn render_html(tree: &FamilyTree, options: &ReportOptions, generated_on: NaiveDate) -> String {
    let title = escape_html(&options.title());
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{title}</title>\n"));
    out.push_str(&format!("<style>\n{STYLESHEET}</style>\n"));
    out.push_str("</head>\n<body>\n");

    out.push_str("<header>\n");
    out.push_str(&format!("<h1>{title}</h1>\n"));
    out.push_str(&format!(
        "<p class=\"generated\">Generated on {}</p>\n",
        generated_on.format(GENERATED_DATE_FORMAT)
    ));
    out.push_str("</header>\n");

    out.push_str("<section id=\"individuals\">\n<h2>Individuals</h2>\n");
    for individual in &tree.individuals {
        render_individual(&mut out, individual, options);
    }
    out.push_str("</section>\n");

    if options.family_section {
        out.push_str("<section id=\"families\">\n<h2>Families</h2>\n");
        for family in &tree.families {
            render_family(&mut out, family);
        }
        out.push_str("</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_individual(out: &mut String, individual: &Individual, options: &ReportOptions) {
    let id = escape_html(&individual.individual_id);
    out.push_str(&format!("<article class=\"individual\" id=\"{id}\">\n"));
    out.push_str(&format!(
        "<h3>{} <span class=\"id\">{id}</span></h3>\n",
        escape_html(individual.primary_name().unwrap_or("Unnamed"))
    ));

    if individual.names.len() > 1 {
        let aliases: Vec<String> = individual.names[1..].iter().map(|n| escape_html(n)).collect();
        out.push_str(&format!("<p class=\"aliases\">Also known as {}</p>\n", aliases.join(", ")));
    }
    if let Some(birth) = &individual.birth {
        render_event(out, "Born", birth);
    }
    if let Some(death) = &individual.death {
        render_event(out, "Died", death);
    }

    if options.family_inline {
        for membership in &individual.families {
            render_membership(out, membership, options.family_section);
        }
    }

    out.push_str("</article>\n");
}

fn render_event(out: &mut String, label: &str, event: &EventInfo) {
    out.push_str(&format!(
        "<p class=\"event\">{label}: {} at {}</p>\n",
        escape_html(&event.date),
        escape_html(&event.location)
    ));
}

fn render_membership(out: &mut String, membership: &FamilyMembership, link_family: bool) {
    let family = &membership.family;
    let name = escape_html(&family_display_name(family));
    let family_ref = if link_family {
        format!("<a href=\"#{}\">{name}</a>", escape_html(&family.family_id))
    } else {
        name
    };

    out.push_str("<div class=\"membership\">\n");
    out.push_str(&format!(
        "<p>{} in {family_ref}</p>\n",
        escape_html(&membership.position_of_individual)
    ));
    render_positions(out, &family.positions);
    render_descriptions(out, &family.descriptions);
    out.push_str("</div>\n");
}

fn render_family(out: &mut String, family: &Family) {
    out.push_str(&format!(
        "<article class=\"family\" id=\"{}\">\n",
        escape_html(&family.family_id)
    ));
    out.push_str(&format!(
        "<h3>{} <span class=\"id\">{}</span></h3>\n",
        escape_html(&family_display_name(family)),
        escape_html(&family.family_id)
    ));
    render_positions(out, &family.positions);
    render_descriptions(out, &family.descriptions);
    out.push_str("</article>\n");
}

fn render_positions(out: &mut String, positions: &[FamilyPosition]) {
    if positions.is_empty() {
        return;
    }
    out.push_str("<ul class=\"positions\">\n");
    for position in positions {
        let members: Vec<String> = position
            .individuals
            .iter()
            .map(|member| {
                let label = member.names.first().map(String::as_str).unwrap_or("Unnamed");
                format!(
                    "<a href=\"#{}\">{}</a>",
                    escape_html(&member.individual_id),
                    escape_html(label)
                )
            })
            .collect();
        out.push_str(&format!(
            "<li><span class=\"position-name\">{}</span>: {}</li>\n",
            escape_html(&position.name),
            members.join(", ")
        ));
    }
    out.push_str("</ul>\n");
}

fn render_descriptions(out: &mut String, descriptions: &[String]) {
    for description in descriptions {
        out.push_str(&format!("<p class=\"description\">{}</p>\n", escape_html(description)));
    }
}

fn family_display_name(family: &Family) -> String {
    if family.family_name.is_empty() {
        "Unnamed family".to_string()
    } else {
        format!("{} family", family.family_name)
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
