#![cfg(feature = "std")]

use crate::{
    cell::{column_label, Cell},
    common::Severity,
    flags::CellFlags,
    game::Game,
    player::Player,
};

/// What the client needs from the presentation layer.
pub trait Ui: Send {
    /// Show a message such as the final result or a failure.
    fn announce(&mut self, message: &str, severity: Severity);

    /// The model changed; redraw as needed.
    fn refresh(&mut self, _game: &Game) {}

    /// Dismiss any message currently shown.
    fn hide(&mut self) {}
}

/// Prints announcements and, optionally, every battlefield to stdout.
#[derive(Debug, Default)]
pub struct ConsoleUi {
    pub show_boards: bool,
}

impl ConsoleUi {
    pub fn new(show_boards: bool) -> Self {
        Self { show_boards }
    }
}

impl Ui for ConsoleUi {
    fn announce(&mut self, message: &str, severity: Severity) {
        let tag = match severity {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Danger => "danger",
        };
        std::println!("[{}] {}", tag, message);
    }

    fn refresh(&mut self, game: &Game) {
        if self.show_boards {
            for player in game.players() {
                print_player_view(player);
            }
        }
    }
}

fn cell_char(cell: &Cell) -> char {
    let flags = cell.flags();
    if flags.contains(CellFlags::DEAD_SHIP) {
        'X'
    } else if flags.contains(CellFlags::SHIP) {
        'S'
    } else if flags.contains(CellFlags::DEAD) {
        'o'
    } else if flags.contains(CellFlags::SKIP) {
        '-'
    } else {
        '.'
    }
}

/// Print one player's battlefield as a grid.
pub fn print_player_view(player: &Player) {
    let battlefield = player.battlefield();
    let size = battlefield.size();
    let id = player
        .id()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "unconfirmed".to_string());
    std::println!(
        "\n{} ({}, {})",
        player.name(),
        id,
        if player.is_ai_controlled() { "ai" } else { "human" }
    );
    std::print!("   ");
    for c in 0..size {
        std::print!(" {}", column_label(c));
    }
    std::println!();
    for (r, row) in battlefield.cells().chunks(size.max(1)).enumerate() {
        std::print!("{:2} ", r + 1);
        for cell in row {
            std::print!(" {}", cell_char(cell));
        }
        std::println!();
    }
}
