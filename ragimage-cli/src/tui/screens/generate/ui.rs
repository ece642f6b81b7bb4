//! Generation screen rendering

use super::state::{Field, GenerateState, TextField};
use crate::tui::theme;
use ragimage_core::{ResultView, StatusTone};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

/// Main screen renderer
pub struct GenerateUI;

impl GenerateUI {
    pub fn render(frame: &mut Frame, state: &mut GenerateState, endpoint: &str) {
        let result_height = if state.session.result_visible() { 6 } else { 0 };

        let chunks = Layout::vertical([
            Constraint::Length(3),             // Status bar
            Constraint::Length(3),             // Form
            Constraint::Length(1),             // Notice
            Constraint::Min(5),                // Log output
            Constraint::Length(result_height), // Result area
            Constraint::Length(1),             // Help bar
        ])
        .split(frame.area());

        Self::render_status_bar(frame, chunks[0], state, endpoint);
        Self::render_form(frame, chunks[1], state);
        Self::render_notice(frame, chunks[2], state);
        Self::render_logs(frame, chunks[3], state);
        if state.session.result_visible() {
            Self::render_result(frame, chunks[4], state);
        }
        Self::render_help_bar(frame, chunks[5], state);
    }

    fn render_status_bar(frame: &mut Frame, area: Rect, state: &GenerateState, endpoint: &str) {
        let session = &state.session;
        let spinner = if session.is_in_flight() {
            Span::styled(
                format!(" {} ", SPINNER[state.loading_frame % SPINNER.len()]),
                theme::loading(),
            )
        } else {
            Span::raw(" ")
        };

        let line = Line::from(vec![
            Span::styled(" ragimage ", theme::title()),
            Span::styled("│ ", theme::footer()),
            Span::styled(endpoint.to_string(), theme::footer()),
            Span::styled(" │", theme::footer()),
            spinner,
            Span::styled(
                format!(" {} ", session.status_text()),
                theme::status(session.tone()),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(theme::border());
        frame.render_widget(Paragraph::new(line).block(block), area);
    }

    fn render_form(frame: &mut Frame, area: Rect, state: &GenerateState) {
        let chunks =
            Layout::horizontal([Constraint::Min(20), Constraint::Length(16)]).split(area);

        let editable = state.session.submit_enabled();
        Self::render_field(
            frame,
            chunks[0],
            " Prompt ",
            &state.prompt,
            editable && state.focus == Field::Prompt,
            editable,
        );
        Self::render_field(
            frame,
            chunks[1],
            " Images ",
            &state.num_images,
            editable && state.focus == Field::NumImages,
            editable,
        );
    }

    fn render_field(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        field: &TextField,
        focused: bool,
        editable: bool,
    ) {
        let content = if focused {
            let mut chars: Vec<char> = field.value.chars().collect();
            if field.cursor_pos >= chars.len() {
                chars.push('_');
            } else {
                chars.insert(field.cursor_pos, '|');
            }
            Span::styled(chars.into_iter().collect::<String>(), theme::text())
        } else if editable {
            Span::styled(field.value.clone(), theme::text())
        } else {
            Span::styled(field.value.clone(), theme::footer())
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                theme::border_active()
            } else {
                theme::border()
            })
            .title(title.to_string());
        frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
    }

    fn render_notice(frame: &mut Frame, area: Rect, state: &GenerateState) {
        let line = match (&state.notice, &state.saved_image) {
            (Some(notice), _) => Line::from(Span::styled(
                format!(" {notice}"),
                theme::status(StatusTone::Error),
            )),
            (None, Some(path)) => Line::from(Span::styled(
                format!(" Saved to {}", path.display()),
                theme::key_hint(),
            )),
            (None, None) => Line::from(""),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_logs(frame: &mut Frame, area: Rect, state: &mut GenerateState) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2) as usize;
        let lines: Vec<Line> = if state.session.log().is_empty() {
            vec![Line::from(Span::styled(
                "Progress will appear here",
                theme::placeholder(),
            ))]
        } else {
            state
                .session
                .log_lines()
                .map(|l| Line::from(l.to_string()))
                .collect()
        };

        // Scroll offsets count wrapped rows, not log lines
        let para = Paragraph::new(lines).wrap(Wrap { trim: false });
        let total_rows = para.line_count(inner_width);
        let max_scroll =
            u16::try_from(total_rows.saturating_sub(inner_height)).unwrap_or(u16::MAX);
        state.log_max_scroll = max_scroll;
        let scroll = state.log_scroll.min(max_scroll);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(" Log ");
        frame.render_widget(para.block(block).scroll((scroll, 0)), area);
    }

    fn render_result(frame: &mut Frame, area: Rect, state: &GenerateState) {
        let lines = match state.session.result() {
            Some(ResultView::Image { src, alt }) => {
                let location = state.image_url.as_deref().unwrap_or(src);
                vec![
                    Line::from(Span::styled(alt.clone(), theme::title())),
                    Line::from(Span::styled(location.to_string(), theme::text())),
                ]
            }
            Some(ResultView::Error {
                title,
                message,
                hint,
            }) => vec![
                Line::from(Span::styled(title.clone(), theme::error_title())),
                Line::from(Span::styled(message.clone(), theme::text())),
                Line::from(Span::styled(hint.clone(), theme::footer())),
            ],
            None => Vec::new(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(" Result ");
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_help_bar(frame: &mut Frame, area: Rect, state: &GenerateState) {
        let help = if state.session.is_in_flight() {
            Line::from(vec![
                Span::styled(" Generating... ", theme::loading()),
                Span::styled("PgUp/PgDn", theme::key_hint()),
                Span::raw(": Scroll │ "),
                Span::styled("Ctrl+Q", theme::key_destructive()),
                Span::raw(": Quit "),
            ])
        } else {
            Line::from(vec![
                Span::styled(" Enter", theme::key_hint()),
                Span::raw(": Generate │ "),
                Span::styled("Tab", theme::key_hint()),
                Span::raw(": Switch field │ "),
                Span::styled("PgUp/PgDn", theme::key_hint()),
                Span::raw(": Scroll │ "),
                Span::styled("Esc", theme::key_destructive()),
                Span::raw(": Quit "),
            ])
        };
        frame.render_widget(Paragraph::new(help), area);
    }
}
