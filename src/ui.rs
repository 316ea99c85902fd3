//! Terminal UI rendering with ratatui

use blockfall::{Game, PieceType};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const EMPTY: &str = "  ";
const BLOCK: &str = "██";
const LOCKED_COLOR: Color = Color::Gray;
const STATS_WIDTH: u16 = 18;

/// Render the board and the score panel
pub fn render_game(frame: &mut Frame, game: &Game) {
    let board = game.board();
    // Two characters per cell plus borders
    let board_width = u16::try_from(board.cols())
        .unwrap_or(u16::MAX)
        .saturating_mul(2)
        .saturating_add(2);
    let board_height = u16::try_from(board.rows())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let game_area = center_rect(
        frame.area(),
        board_width.saturating_add(STATS_WIDTH),
        board_height,
    );

    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(board_width),
            Constraint::Length(STATS_WIDTH),
        ])
        .split(game_area);

    render_board(frame, layout[0], game);
    render_stats(frame, layout[1], game);
}

fn render_board(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active = game.active();
    let active_cells = active.cells();
    let active_style = Style::default().fg(piece_color(active.piece_type));

    let lines: Vec<Line> = game
        .board()
        .rows_iter()
        .enumerate()
        .map(|(y, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(x, cell)| {
                    if active_cells.contains(&(x as i32, y as i32)) {
                        Span::styled(BLOCK, active_style)
                    } else if cell.is_filled() {
                        Span::styled(BLOCK, Style::default().fg(LOCKED_COLOR))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_stats(frame: &mut Frame, area: Rect, game: &Game) {
    let block = Block::default().title(" Stats ").borders(Borders::ALL);

    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::White);
    let stats = vec![
        Line::styled("Score", label),
        Line::styled(game.score().to_string(), value),
        Line::raw(""),
        Line::styled("Level", label),
        Line::styled(game.level().to_string(), value),
        Line::raw(""),
        Line::styled("Lines", label),
        Line::styled(game.lines().to_string(), value),
        Line::raw(""),
        Line::styled("Speed", label),
        Line::styled(format!("{} ms", game.fall_interval_ms()), value),
        Line::raw(""),
        Line::styled("Seed", label),
        Line::styled(format!("{:016x}", game.seed()), value),
    ];

    frame.render_widget(Paragraph::new(stats).block(block), area);
}

/// Display colour of the falling piece; locked cells are uncoloured
fn piece_color(piece_type: PieceType) -> Color {
    match piece_type {
        PieceType::I => Color::Cyan,
        PieceType::J => Color::Blue,
        PieceType::L => Color::Rgb(255, 165, 0), // Orange
        PieceType::O => Color::Yellow,
        PieceType::S => Color::Green,
        PieceType::T => Color::Magenta,
        PieceType::Z => Color::Red,
    }
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
