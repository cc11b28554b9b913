use anyhow::Error;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height. Used for modal dialogs.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// One decimal place, the way ratings were entered.
pub(crate) fn format_rating(rating: f64) -> String {
    format!("{rating:.1}")
}

/// Flatten multi-line text so it fits a single table cell.
pub(crate) fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("Recipe name is required."))
            .context("failed to save recipe")
            .unwrap_err();
        assert_eq!(surface_error(&err), "Recipe name is required.");
    }

    #[test]
    fn ratings_show_one_decimal() {
        assert_eq!(format_rating(4.0), "4.0");
        assert_eq!(format_rating(4.26), "4.3");
    }

    #[test]
    fn single_line_collapses_whitespace() {
        assert_eq!(single_line("Boil pasta.\n  Serve."), "Boil pasta. Serve.");
    }

    #[test]
    fn centered_rect_stays_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 10);
    }
}
