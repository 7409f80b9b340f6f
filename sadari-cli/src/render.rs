//! Plain-text ladder drawing shared by the console and Markdown reports.
use sadari_game::{GameResult, trace};
use unicode_width::UnicodeWidthChar;

/// Terminal columns between two vertical lines.
const GAP: usize = 5;
const LABEL_WIDTH: usize = GAP + 1;

/// Clip `label` to `GAP` terminal columns and pad it to `LABEL_WIDTH`.
/// Widths are display widths, so `꽝` and other wide glyphs count as two.
fn fit(label: &str) -> String {
    let mut clipped = String::with_capacity(label.len() + LABEL_WIDTH);
    let mut width = 0;
    for ch in label.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > GAP {
            break;
        }
        clipped.push(ch);
        width += ch_width;
    }
    clipped.extend(std::iter::repeat_n(' ', LABEL_WIDTH - width));
    clipped
}

fn label_row<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    let row: String = labels.map(fit).collect();
    row.trim_end().to_string()
}

/// Ladder as text lines: player names, one line per rung row, then the
/// bottom reward slots.
///
/// With `highlight` set to a start column, the vertical lines that player's
/// token travels down are drawn as `#` and the rungs it crosses as `=`.
/// Start columns outside the ladder are ignored.
pub fn ladder_lines(result: &GameResult, highlight: Option<usize>) -> Vec<String> {
    let ladder = &result.ladder;
    let players = ladder.num_players();
    let path = highlight
        .filter(|&start| start < players)
        .map(|start| trace(ladder, start));
    let mut lines = Vec::with_capacity(ladder.num_rows() + 2);

    lines.push(label_row(result.players.iter().map(|p| p.name.as_str())));
    for (row, slots) in ladder.rows().iter().enumerate() {
        // Columns the token occupies entering and leaving this row.
        let on_path = path.as_ref().map(|path| (path[row], path[row + 1]));
        let mut line = String::with_capacity(players * LABEL_WIDTH);
        for column in 0..players {
            let walked = on_path.is_some_and(|(from, to)| column == from || column == to);
            line.push(if walked { '#' } else { '|' });
            if let Some(&rung) = slots.get(column) {
                let crossed = on_path.is_some_and(|(from, to)| from != to && from.min(to) == column);
                line.push_str(match (rung, crossed) {
                    (true, true) => "=====",
                    (true, false) => "-----",
                    (false, _) => "     ",
                });
            }
        }
        lines.push(line);
    }
    lines.push(label_row(result.bottom_labels().into_iter()));
    lines
}
