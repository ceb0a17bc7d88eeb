//! Ratatui-based terminal UI.
//!
//! Five editable inputs (penetration depth, critical exposure, exposure, slice
//! thickness, target cure depth). Every edit recomputes the working curve and
//! the derived exposures. A field that does not parse keeps the last result on
//! screen; an out-of-range value only blanks the outputs that depend on it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};
use tracing::debug;

use crate::app::pipeline::evaluate;
use crate::domain::{CurvePoint, Evaluation, Summation, WorkingCurveInputs};
use crate::error::{AppError, EXIT_TERMINAL};
use crate::report::{
    format_cure_depth, format_output, format_print_through, format_solved_exposure, format_volumetric,
};

mod working_curve_chart;

use working_curve_chart::WorkingCurveChart;

const FIELD_LABELS: [&str; 5] = [
    "Penetration Depth (µm)",
    "Critical Exposure (mJ/cm2)",
    "Exposure (mJ/cm2)",
    "Slice Thickness (µm)",
    "Target Cure Depth (µm)",
];

/// Start the TUI.
pub fn run(inputs: WorkingCurveInputs, sample_count: usize, summation: Summation) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(inputs, sample_count, summation);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(EXIT_TERMINAL, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    fields: [String; 5],
    selected_field: usize,
    inputs: WorkingCurveInputs,
    sample_count: usize,
    summation: Summation,
    status: String,
    eval: Option<Evaluation>,
}

impl App {
    fn new(inputs: WorkingCurveInputs, sample_count: usize, summation: Summation) -> Self {
        let fields = [
            fmt_field(inputs.penetration_depth),
            fmt_field(inputs.critical_exposure),
            fmt_field(inputs.exposure),
            fmt_field(inputs.slice_thickness),
            fmt_field(inputs.target_cure_depth),
        ];
        let mut app = Self {
            fields,
            selected_field: 0,
            inputs,
            sample_count,
            summation,
            status: String::new(),
            eval: None,
        };
        app.recompute();
        app
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Tab => {
                self.selected_field = (self.selected_field + 1).min(FIELD_LABELS.len() - 1);
            }
            KeyCode::Char('m') => {
                self.summation.method = self.summation.method.toggled();
                self.recompute();
            }
            KeyCode::Backspace => {
                self.fields[self.selected_field].pop();
                self.recompute();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.fields[self.selected_field].push(c);
                self.recompute();
            }
            _ => {}
        }
        false
    }

    fn recompute(&mut self) {
        let inputs = match parse_inputs(&self.fields) {
            Ok(inputs) => inputs,
            Err(msg) => {
                self.status = msg;
                return;
            }
        };

        let eval = evaluate(&inputs, self.sample_count, self.summation);
        let first_error = eval.first_error();
        debug!(error = ?first_error, "tui recompute");

        self.status = match first_error {
            Some(err) => err.to_string(),
            None => format!("series: {}", self.summation.method.display_name()),
        };
        self.inputs = inputs;
        self.eval = Some(eval);
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("cure", Style::default().fg(Color::Cyan)),
            Span::raw(" - A working curve helper"),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(46), Constraint::Min(0)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(0)])
            .split(chunks[0]);

        self.draw_settings(frame, left[0]);
        self.draw_outputs(frame, left[1]);
        self.draw_chart(frame, chunks[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FIELD_LABELS
            .iter()
            .zip(self.fields.iter())
            .map(|(label, value)| ListItem::new(format!("{label:<27} {value}")))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_outputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines: Vec<Line> = match &self.eval {
            Some(eval) => output_lines(eval)
                .into_iter()
                .enumerate()
                .map(|(i, text)| {
                    if i == 1 {
                        Line::from(Span::styled(text, Style::default().add_modifier(Modifier::BOLD)))
                    } else {
                        Line::from(text)
                    }
                })
                .collect(),
            None => vec![Line::from(Span::styled(
                "No valid inputs yet.",
                Style::default().fg(Color::Yellow),
            ))],
        };

        let p = Paragraph::new(Text::from(lines))
            .wrap(ratatui::widgets::Wrap { trim: true })
            .block(Block::default().title("Results").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Working Curve").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(eval) = &self.eval else {
            let msg = Paragraph::new("Waiting for valid inputs...").style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let curve = match &eval.curve {
            Ok(curve) => curve,
            Err(e) => {
                let msg = Paragraph::new(e.to_string())
                    .wrap(ratatui::widgets::Wrap { trim: true })
                    .style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, inner);
                return;
            }
        };

        let cure_depth = eval.cure_depth_at_exposure.ok().flatten();
        let series = chart_series(curve, cure_depth, self.inputs.exposure);
        let widget = WorkingCurveChart {
            curve: &series.curve,
            marker: series.marker,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  type to edit  Backspace delete  m series  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn fmt_field(v: f64) -> String {
    format!("{v}")
}

fn parse_inputs(fields: &[String; 5]) -> Result<WorkingCurveInputs, String> {
    let mut values = [0.0f64; 5];
    for (i, raw) in fields.iter().enumerate() {
        values[i] = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Invalid {}: '{}'", FIELD_LABELS[i], raw.trim()))?;
    }
    Ok(WorkingCurveInputs {
        penetration_depth: values[0],
        critical_exposure: values[1],
        exposure: values[2],
        slice_thickness: values[3],
        target_cure_depth: values[4],
    })
}

/// The four result lines, each showing its own value, `n/a` or error.
fn output_lines(eval: &Evaluation) -> [String; 4] {
    [
        format_output("Cure depth", &eval.cure_depth_at_exposure, |cd| format_cure_depth(*cd)),
        format_output("Set exposure to", &eval.solved_exposure, |s| format_solved_exposure(*s)),
        format_output("Volumetric exposure", &eval.volumetric_exposure, |v| format_volumetric(*v)),
        format_output("Print through", &eval.print_through, format_print_through),
    ]
}

struct ChartSeries {
    curve: Vec<(f64, f64)>,
    marker: Option<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build chart series; uncured depths are drawn on the zero line.
fn chart_series(points: &[CurvePoint], cure_depth: Option<f64>, exposure: f64) -> ChartSeries {
    let curve: Vec<(f64, f64)> = points
        .iter()
        .map(|p| (p.exposure, p.cure_depth.max(0.0)))
        .collect();

    let x0 = curve.first().map(|&(x, _)| x).unwrap_or(0.0);
    let mut x1 = curve.last().map(|&(x, _)| x).unwrap_or(1.0);
    if x1 <= x0 {
        x1 = x0 + 1.0;
    }

    let y_max = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y_top = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };

    let marker = cure_depth
        .filter(|_| exposure >= x0 && exposure <= x1)
        .map(|cd| (exposure, cd.max(0.0)));

    ChartSeries {
        curve,
        marker,
        x_bounds: [x0, x1],
        y_bounds: [0.0, y_top],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SeriesMethod;

    fn app() -> App {
        App::new(WorkingCurveInputs::default(), 100, Summation::default())
    }

    #[test]
    fn starts_with_default_evaluation() {
        let app = app();
        assert_eq!(app.fields[0], "120");
        assert_eq!(app.fields[2], "0");
        assert!(app.eval.is_some());
    }

    #[test]
    fn typing_recomputes() {
        let mut app = app();
        app.selected_field = 2;
        app.handle_key(KeyCode::Backspace);
        for c in "250".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        assert_eq!(app.fields[2], "250");
        assert_eq!(app.inputs.exposure, 250.0);
        let cd = app
            .eval
            .as_ref()
            .and_then(|e| e.cure_depth_at_exposure.ok().flatten())
            .unwrap();
        assert!((cd - 276.31).abs() < 0.01);
    }

    #[test]
    fn unparsable_input_keeps_last_result() {
        let mut app = app();
        app.selected_field = 0;
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        // "12" and "1" were still valid; the empty field is not.
        assert!(app.status.starts_with("Invalid Penetration Depth"), "{}", app.status);
        assert_eq!(app.inputs.penetration_depth, 1.0);
        assert!(app.eval.as_ref().is_some_and(|e| e.curve.is_ok()));
    }

    #[test]
    fn zero_penetration_depth_blanks_only_dependent_outputs() {
        let mut app = app();
        app.selected_field = 0;
        for _ in 0..3 {
            app.handle_key(KeyCode::Backspace);
        }
        app.handle_key(KeyCode::Char('0'));
        assert_eq!(app.inputs.penetration_depth, 0.0);
        assert!(app.status.contains("`dp`"), "{}", app.status);

        let eval = app.eval.as_ref().unwrap();
        assert!(eval.curve.is_err());
        let lines = output_lines(eval);
        assert_eq!(lines[0], "Cure depth: n/a");
        assert_eq!(lines[1], "Set exposure to: n/a");
        assert!(lines[2].starts_with("Volumetric exposure: invalid parameter `dp`"), "{}", lines[2]);
        assert!(lines[3].starts_with("Print through: invalid parameter `dp`"), "{}", lines[3]);
    }

    #[test]
    fn zero_slice_thickness_still_solves_exposure() {
        let mut app = app();
        app.selected_field = 3;
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Backspace);
        app.handle_key(KeyCode::Char('0'));
        assert_eq!(app.inputs.slice_thickness, 0.0);

        let lines = output_lines(app.eval.as_ref().unwrap());
        assert_eq!(lines[1], "Set exposure to: 25.21");
        assert!(lines[2].contains("`dz`"), "{}", lines[2]);
        assert!(lines[3].contains("`dz`"), "{}", lines[3]);
    }

    #[test]
    fn target_field_is_labelled_as_a_target() {
        assert_eq!(FIELD_LABELS[4], "Target Cure Depth (µm)");
        assert_eq!(FIELD_LABELS[2], "Exposure (mJ/cm2)");
    }

    #[test]
    fn navigation_and_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        assert_eq!(app.selected_field, 0);
        for _ in 0..10 {
            app.handle_key(KeyCode::Down);
        }
        assert_eq!(app.selected_field, 4);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn m_toggles_series_method() {
        let mut app = app();
        app.handle_key(KeyCode::Char('m'));
        assert_eq!(app.summation.method, SeriesMethod::ClosedForm);
        assert_eq!(app.status, "series: closed-form");
    }

    #[test]
    fn chart_series_clips_uncured_region() {
        let inputs = WorkingCurveInputs {
            exposure: 50.0,
            ..WorkingCurveInputs::default()
        };
        let eval = evaluate(&inputs, 100, Summation::default());
        let cure_depth = eval.cure_depth_at_exposure.unwrap();
        let series = chart_series(eval.curve.as_ref().unwrap(), cure_depth, inputs.exposure);
        assert!(series.curve.iter().all(|&(_, y)| y >= 0.0));
        assert_eq!(series.x_bounds, [12.5, 250.0]);
        assert_eq!(series.y_bounds[0], 0.0);
        let (mx, my) = series.marker.unwrap();
        assert_eq!(mx, 50.0);
        assert!((my - 120.0 * 2f64.ln()).abs() < 1e-9);
    }
}
