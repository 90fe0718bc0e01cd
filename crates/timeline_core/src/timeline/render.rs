use super::TimelineCard;

/// Renders cards as plain text, one block per event.
pub fn render_text(project_name: &str, cards: &[TimelineCard]) -> String {
    let mut lines = vec![format!("timeline - {project_name}")];
    if cards.is_empty() {
        lines.push("No data to display".to_string());
    }

    for card in cards {
        let dates = match card.end_date {
            Some(end) if end != card.start_date => format!("{} .. {}", card.start_date, end),
            _ => card.start_date.to_string(),
        };
        lines.push(format!("{dates}  {}", card.title));
        if !card.places.is_empty() {
            lines.push(format!("    at: {}", card.places.join(", ")));
        }
        if !card.characters.is_empty() {
            lines.push(format!("    with: {}", card.characters.join(", ")));
        }
        let summary = card.description.lines().next().unwrap_or("").trim();
        if !summary.is_empty() {
            lines.push(format!("    {summary}"));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use crate::timeline::TimelineCard;
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn empty_timeline_says_so() {
        assert_eq!(
            render_text("default", &[]),
            "timeline - default\nNo data to display\n"
        );
    }

    #[test]
    fn card_lists_range_places_and_characters() {
        let start = NaiveDate::from_ymd_opt(1415, 10, 25).unwrap();
        let card = TimelineCard {
            event_id: Uuid::new_v4(),
            title: "Agincourt".to_string(),
            description: "Mud.\nMore mud.".to_string(),
            start_date: start,
            end_date: NaiveDate::from_ymd_opt(1415, 10, 26),
            span_days: 2,
            characters: vec!["Henry".to_string()],
            places: vec!["Picardy".to_string()],
            accent_colour: None,
            thumbnail: None,
        };
        let text = render_text("war", &[card]);
        assert!(text.contains("1415-10-25 .. 1415-10-26  Agincourt"));
        assert!(text.contains("at: Picardy"));
        assert!(text.contains("with: Henry"));
        assert!(text.contains("    Mud."));
        assert!(!text.contains("More mud"));
        assert!(text.ends_with("    Mud.\n"));
    }
}
