//! Table formatting utilities

use prettytable::{Cell, Row, Table};
use quake_md2::{Animation, AnimationPlayer, PlaybackState};

use super::format::format_frame_range;

/// Column titles for [`animation_row`]
pub const ANIMATION_COLUMNS: [&str; 5] = ["#", "Name", "Frames", "Count", "Looping"];

/// Column titles for [`playback_row`]
pub const PLAYBACK_COLUMNS: [&str; 5] = ["Time", "Current", "Next", "Blend", "State"];

/// Create a table with bold titles
pub fn create_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(Row::new(
        headers
            .iter()
            .map(|h| Cell::new(h).style_spec("b"))
            .collect(),
    ));
    table
}

/// Add a row of plain cells
pub fn add_table_row(table: &mut Table, cells: Vec<String>) {
    table.add_row(Row::new(cells.iter().map(|s| Cell::new(s)).collect()));
}

/// One line of the animation listing
pub fn animation_row(index: usize, anim: &Animation) -> Vec<String> {
    vec![
        index.to_string(),
        anim.name.clone(),
        format_frame_range(anim.start_frame, anim.end_frame),
        anim.frame_count().to_string(),
        if anim.looping { "yes" } else { "no" }.to_string(),
    ]
}

/// One line of a simulated playback trace
pub fn playback_row(time: f32, player: &AnimationPlayer, state: PlaybackState) -> Vec<String> {
    vec![
        format!("{time:.3}"),
        player.current_frame().to_string(),
        player.next_frame().to_string(),
        format!("{:.2}", player.interpolation()),
        format!("{state:?}"),
    ]
}
