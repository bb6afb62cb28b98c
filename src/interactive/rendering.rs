//! TUI rendering with ratatui

use super::app::App;
use crate::commands::session::GameStore;
use crate::core::{Evaluation, MAX_TRIES, WORD_LENGTH};
use crate::game::{Key, Status, keyboard_layout};
use crate::output::display::status_line;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

const GREEN: Color = Color::Rgb(0x20, 0xAA, 0x57);
const YELLOW: Color = Color::Rgb(0xE5, 0xB2, 0x2D);
const GRAY: Color = Color::Rgb(0x98, 0x98, 0x98);

/// Main UI rendering function
pub fn ui<S: GameStore>(f: &mut Frame, app: &App<'_, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                    // Header
            Constraint::Length(MAX_TRIES as u16 + 2), // Grid
            Constraint::Length(3),                    // Banner
            Constraint::Length(5),                    // Keyboard
            Constraint::Min(3),                       // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_grid(f, app, chunks[1]);
    render_banner(f, app, chunks[2]);
    render_keyboard(f, app, chunks[3]);
    render_status(f, app, chunks[4]);
}

/// Colors for a tile or key
fn evaluation_style(evaluation: Evaluation) -> Style {
    match evaluation {
        Evaluation::Correct => Style::default()
            .fg(Color::White)
            .bg(GREEN)
            .add_modifier(Modifier::BOLD),
        Evaluation::Present => Style::default()
            .fg(Color::Black)
            .bg(YELLOW)
            .add_modifier(Modifier::BOLD),
        Evaluation::Absent => Style::default().fg(Color::White).bg(GRAY),
        Evaluation::Unknown => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        Evaluation::Empty => Style::default().fg(Color::DarkGray),
    }
}

fn highlighted(style: Style, changed: bool) -> Style {
    if changed {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("W O R D L E")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_grid<S: GameStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let lines: Vec<Line> = (0..MAX_TRIES)
        .map(|row| {
            let spans: Vec<Span> = (row * WORD_LENGTH..(row + 1) * WORD_LENGTH)
                .flat_map(|index| {
                    let cell = app.game.cell_at(index);
                    let letter = cell.letter.unwrap_or('·');
                    let style = highlighted(
                        evaluation_style(cell.evaluation),
                        app.last_outcome.cells.contains(&index),
                    );
                    [Span::styled(format!(" {letter} "), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let grid = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(grid, area);
}

fn render_banner<S: GameStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let (text, color) = match app.game.status() {
        Status::Won => (format!("🎉 {} 🎉", status_line(&app.game)), Color::Green),
        Status::Lost => (status_line(&app.game), Color::Red),
        Status::Playing => (status_line(&app.game), Color::Yellow),
    };

    let banner = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(banner, area);
}

fn render_keyboard<S: GameStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let lines: Vec<Line> = keyboard_layout()
        .iter()
        .map(|row| {
            let spans: Vec<Span> = row
                .iter()
                .flat_map(|&key| {
                    let changed = match key {
                        Key::Letter(letter) => app.last_outcome.keys.contains(&char::from(letter)),
                        Key::Submit | Key::Delete => false,
                    };
                    let style = highlighted(evaluation_style(app.game.key_state(key)), changed);
                    [Span::styled(format!(" {} ", key.label()), style), Span::raw(" ")]
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let keyboard = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Keyboard ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(keyboard, area);
}

fn render_status<S: GameStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area);

    let stats_text = format!(
        "Games: {} | Win Rate: {:.0}%",
        app.stats.total_games,
        app.stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[0]);

    let distribution = app
        .stats
        .guess_distribution
        .iter()
        .enumerate()
        .map(|(i, count)| format!("{}:{count}", i + 1))
        .collect::<Vec<_>>()
        .join(" ");
    let distribution = Paragraph::new(distribution).alignment(Alignment::Center);
    f.render_widget(distribution, chunks[1]);

    let help_text = if app.game.status().is_over() {
        "Ctrl-N: New Game | Esc: Quit"
    } else {
        "Enter: Guess | Ctrl-N: New | Esc: Quit"
    };
    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::session::MemoryStore;
    use crate::wordlists::Vocabulary;
    use crate::wordlists::loader::words_from_slice;
    use ratatui::{Terminal, backend::TestBackend};

    fn screen<S: GameStore>(app: &App<'_, S>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_board_keyboard_and_status() {
        let vocabulary = Vocabulary::new(
            words_from_slice(&["crate"]).unwrap(),
            words_from_slice(&["crane"]).unwrap(),
        )
        .unwrap();
        let mut app = App::new(&vocabulary, MemoryStore::new()).unwrap();
        for c in "CRATE".chars() {
            app.press(Key::letter(c).unwrap()).unwrap();
        }
        app.press(Key::Submit).unwrap();

        let text = screen(&app);
        assert!(text.contains("W O R D L E"));
        assert!(text.contains(" C "));
        assert!(text.contains("ENTER"));
        assert!(text.contains("Guess 2 of 6"));
        assert!(text.contains("Games: 0"));
    }

    #[test]
    fn correct_tiles_are_green() {
        assert_eq!(evaluation_style(Evaluation::Correct).bg, Some(GREEN));
        assert_eq!(evaluation_style(Evaluation::Present).bg, Some(YELLOW));
        assert_eq!(evaluation_style(Evaluation::Absent).bg, Some(GRAY));
        assert_eq!(evaluation_style(Evaluation::Empty).bg, None);
    }
}
