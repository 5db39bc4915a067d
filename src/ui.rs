use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::game::{LossReason, Phase};
use crate::util::format_clock;
use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Clock turns red when this close to losing on time.
const CLOCK_WARN_SECS: u32 = 10;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.session.phase {
            Phase::Waiting => render_rules(self, area, buf),
            Phase::Playing => render_playing(self, area, buf),
            Phase::Won | Phase::Lost(_) => render_results(self, area, buf),
        }
    }
}

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn render_rules(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let lines = vec![
        Line::from(Span::styled("F O T O G R A M A", bold().fg(Color::Magenta))),
        Line::from(""),
        Line::from("Name the movie from its stills."),
        Line::from(format!(
            "You have {} and {} guesses; each miss costs {} seconds and reveals another still.",
            format_clock(session.config.initial_secs),
            session.config.max_attempts,
            session.config.penalty_secs,
        )),
        Line::from("Both the original and the Spanish release title are accepted."),
        Line::from(""),
        Line::from(Span::styled("press enter to start", dim())),
    ];

    let rules = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    rules.render(centered_vertically(area, 7), buf);
}

fn render_playing(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let frame = &app.puzzle.frames[session.hints.selected()];

    let art_lines = frame.art.len() as u16 + 2; // caption + selector
    let tried_lines = session.history.len().max(1) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2),          // clock + attempts
            Constraint::Length(art_lines),  // selected still
            Constraint::Length(1),          // status line
            Constraint::Length(2),          // guess input
            Constraint::Length(tried_lines), // tried words
            Constraint::Min(0),
            Constraint::Length(1),          // key help
        ])
        .split(area);

    let clock_style = if session.seconds_remaining <= CLOCK_WARN_SECS {
        bold().fg(Color::Red)
    } else {
        bold()
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(format_clock(session.seconds_remaining), clock_style),
        Span::raw("   "),
        Span::styled(
            format!(
                "{}/{} attempts",
                session.attempts_used, session.config.max_attempts
            ),
            dim(),
        ),
    ]))
    .alignment(Alignment::Center);
    header.render(chunks[0], buf);

    render_still(app, chunks[1], buf);

    if let Some(status) = &session.status {
        let style = if status.urgent {
            bold().fg(Color::Red)
        } else {
            Style::default().fg(Color::Yellow)
        };
        Paragraph::new(Span::styled(status.text.clone(), style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
    }

    let input = Paragraph::new(Line::from(vec![
        Span::styled("guess ❯ ", dim()),
        Span::styled(app.input.clone(), bold()),
        Span::styled("▏", dim()),
    ]))
    .alignment(Alignment::Center);
    input.render(chunks[3], buf);

    let tried: Vec<Line> = session
        .history
        .iter()
        .map(|g| {
            if g.skipped {
                Line::from(Span::styled(
                    "‣ [skipped]",
                    dim().add_modifier(Modifier::ITALIC),
                ))
            } else {
                Line::from(Span::styled(format!("‣ {}", g.raw), dim()))
            }
        })
        .collect();
    Paragraph::new(tried)
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        "enter: guess (empty = skip)   ←/→: stills   esc: quit",
        dim().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);
}

fn render_still(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let frame = &app.puzzle.frames[session.hints.selected()];

    let mut lines: Vec<Line> = frame
        .art
        .iter()
        .map(|l| Line::from(Span::styled(l.clone(), Style::default().fg(Color::Magenta))))
        .collect();

    // Truncate the caption to the drawable width
    let max_width = area.width.saturating_sub(2) as usize;
    let caption = if frame.caption.width() > max_width {
        let mut truncated = String::new();
        for ch in frame.caption.chars() {
            if truncated.width() + 2 > max_width {
                truncated.push('…');
                break;
            }
            truncated.push(ch);
        }
        truncated
    } else {
        frame.caption.clone()
    };
    lines.push(Line::from(Span::styled(
        caption,
        Style::default().add_modifier(Modifier::ITALIC),
    )));

    // Selector: revealed stills are numbered, the rest are placeholders
    let mut selector: Vec<Span> = Vec::new();
    for idx in 0..session.hints.total() {
        let label = if idx < session.hints.revealed() {
            if idx == session.hints.selected() {
                Span::styled(format!("[{}]", idx + 1), bold().fg(Color::Magenta))
            } else {
                Span::styled(format!(" {} ", idx + 1), dim())
            }
        } else {
            Span::styled(" · ".to_string(), dim())
        };
        selector.push(label);
    }
    lines.push(Line::from(selector));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let summary = session
        .summary()
        .expect("results screen requires a finished session");

    let mut lines: Vec<Line> = Vec::new();

    match session.phase {
        Phase::Won => {
            lines.push(Line::from(Span::styled(
                "You guessed it!",
                bold().fg(Color::Green),
            )));
            lines.push(Line::from(""));
            let attempts_text = if summary.attempts_used == 0 {
                "first try!".to_string()
            } else {
                format!("{} wrong guesses first", summary.attempts_used)
            };
            lines.push(Line::from(format!(
                "{} on the clock · {}",
                format_clock(summary.elapsed_secs),
                attempts_text
            )));
        }
        Phase::Lost(reason) => {
            let headline = match reason {
                LossReason::TimeExpired => "Time's up.",
                LossReason::AttemptsExhausted => "Out of attempts.",
            };
            lines.push(Line::from(Span::styled(headline, bold().fg(Color::Red))));
            lines.push(Line::from(""));
            if let Some((primary, alternate)) = &summary.revealed_answer {
                lines.push(Line::from(vec![
                    Span::raw("The movie was "),
                    Span::styled(primary.clone(), bold()),
                    Span::raw(format!(" ({alternate})")),
                ]));
            }
            lines.push(Line::from(Span::styled(
                format!(
                    "{} attempts · {} played",
                    summary.attempts_used,
                    format_clock(summary.elapsed_secs)
                ),
                dim(),
            )));
        }
        Phase::Waiting | Phase::Playing => unreachable!(),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "(r)eplay   (n)ew movie   esc: quit",
        dim().add_modifier(Modifier::ITALIC),
    )));

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(centered_vertically(area, 6), buf);
}

fn centered_vertically(area: Rect, content_height: u16) -> Rect {
    let pad = area.height.saturating_sub(content_height) / 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(pad),
            Constraint::Length(content_height),
            Constraint::Min(0),
        ])
        .split(area);
    chunks[1]
}
