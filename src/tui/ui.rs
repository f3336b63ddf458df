use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Gauge, Paragraph, Wrap};

use crate::respondent::RespondentField;
use crate::scoring::{TestResult, MAX_ANSWER, MIN_ANSWER};
use crate::tui::app::{App, InputMode, Outcome, Screen, SubmissionStatus};
use crate::tui::theme::ThemeColors;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 12 || area.width < 40 {
        let msg = Paragraph::new("Terminal demasiado pequeña").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Fill(1),   // Screen body
        Constraint::Length(1), // Status bar
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.screen {
        Screen::Intro => render_intro(frame, chunks[1], app),
        Screen::Respondent => render_respondent(frame, chunks[1], app),
        Screen::Questionnaire => render_questionnaire(frame, chunks[1], app),
        Screen::Results => render_results(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, app);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let left = "Auto-diagnóstico VUCA";
    let mut spans = vec![Span::styled(left, theme.title_style.fg(theme.accent))];

    let step = match app.screen {
        Screen::Intro => "Inicio",
        Screen::Respondent => "Tus datos",
        Screen::Questionnaire => "Cuestionario",
        Screen::Results => "Resultados",
    };
    let padding = (area.width as usize).saturating_sub(left.chars().count() + step.chars().count());
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(step, Style::default().fg(theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_intro(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let bullet = |label: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled("  ✓ ", Style::default().fg(theme.tier_high)),
            Span::styled(label, theme.header_style.fg(theme.text)),
            Span::styled(format!(" {}", text), Style::default().fg(theme.muted)),
        ])
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Auto-diagnóstico ", theme.title_style.fg(theme.accent)),
            Span::styled("VUCA", theme.title_style.fg(theme.accent_alt)),
            Span::styled(" de tu Cadena de Suministro", theme.title_style.fg(theme.text)),
        ])
        .centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "Evalúa el nivel de adaptabilidad y resiliencia de tu cadena frente a la ",
                Style::default().fg(theme.text),
            ),
            Span::styled("volatilidad", Style::default().fg(theme.text).bold()),
            Span::styled(" y la ", Style::default().fg(theme.text)),
            Span::styled("incertidumbre", Style::default().fg(theme.text).bold()),
            Span::styled(".", Style::default().fg(theme.text)),
        ])
        .centered(),
        Line::from(""),
        Line::from(Span::styled("Instrucciones importantes", theme.header_style.fg(theme.text)))
            .centered(),
        Line::from(""),
        bullet("Tiempo estimado:", "10 minutos aprox."),
        bullet("Puntuación:", "Cada respuesta suma de 1 a 10 puntos."),
        bullet("Recomendaciones:", "Solo si el puntaje total o alguna respuesta ≤ 7."),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.status_key_color).bold()),
            Span::styled(" Comenzar auto-diagnóstico", Style::default().fg(theme.text)),
        ])
        .centered(),
        Line::from(""),
        Line::from(Span::styled(
            "Herramienta de evaluación desarrollada para profesionales de cadena de suministro",
            Style::default().fg(theme.muted),
        ))
        .centered(),
    ];

    let inner = centered_rect_fixed(80, area.height, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_respondent(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let form = &app.form;

    let mut lines = vec![
        Line::from(Span::styled(
            "Completa tus datos para recibir el reporte",
            theme.header_style.fg(theme.text),
        )),
        Line::from(""),
    ];

    for field in RespondentField::ALL {
        let focused = form.focused_field() == field;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            theme.field_focused
        } else {
            Style::default().fg(theme.muted)
        };
        let required = if field.is_required() { " *" } else { "" };

        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{}{}", field.label(), required), label_style),
        ]));

        let cursor = if focused { "│" } else { "" };
        lines.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(
                format!("{}{}", form.value(field), cursor),
                Style::default().fg(theme.text),
            ),
        ]));

        match form.error_for(field) {
            Some(err) => lines.push(Line::from(Span::styled(
                format!("    {}", err.message),
                Style::default().fg(theme.error),
            ))),
            None => lines.push(Line::from("")),
        }
    }

    let inner = centered_rect_fixed(70, area.height, area);
    let block = Block::bordered()
        .title(" Tus datos ")
        .border_style(Style::default().fg(theme.popup_border));
    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, inner);
}

fn render_questionnaire(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let total = app.answers.len();
    let index = app.current_question;
    let Some(question) = app.assessment.questions.get(index) else {
        return;
    };

    let inner = centered_rect_fixed(80, area.height, area);
    let chunks = Layout::vertical([
        Constraint::Length(1), // Progress label
        Constraint::Length(1), // Progress gauge
        Constraint::Length(1),
        Constraint::Min(3),    // Question text
        Constraint::Length(3), // Scale
        Constraint::Length(1), // Hint
    ])
    .split(inner);

    let progress = Line::from(vec![
        Span::styled(
            format!("Pregunta {} de {}", index + 1, total),
            theme.header_style.fg(theme.text),
        ),
        Span::styled(
            format!("  ({} respondidas)", app.answered_count()),
            Style::default().fg(theme.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(progress), chunks[0]);

    let ratio = if total == 0 {
        0.0
    } else {
        (index + 1) as f64 / total as f64
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.accent).bg(theme.bar_empty))
        .ratio(ratio.min(1.0))
        .label("");
    frame.render_widget(gauge, chunks[1]);

    let text = Paragraph::new(question.text.as_str())
        .style(Style::default().fg(theme.text).bold())
        .wrap(Wrap { trim: true });
    frame.render_widget(text, chunks[3]);

    let selected = app.current_answer();
    let mut scale = Vec::new();
    for value in MIN_ANSWER..=MAX_ANSWER {
        let label = format!(" {:>2} ", value);
        let style = if selected == Some(value) {
            Style::default().fg(theme.banner_fg).bg(theme.accent).bold()
        } else {
            Style::default().fg(theme.muted)
        };
        scale.push(Span::styled(label, style));
    }
    let scale_lines = vec![
        Line::from(scale).centered(),
        Line::from(vec![
            Span::styled("Nada preparada", Style::default().fg(theme.muted)),
            Span::raw("   ·   "),
            Span::styled("Totalmente preparada", Style::default().fg(theme.muted)),
        ])
        .centered(),
    ];
    frame.render_widget(Paragraph::new(scale_lines), chunks[4]);

    let hint = match selected {
        Some(v) => format!("Respuesta: {}  ·  Enter para continuar", v),
        None => "Elige un valor con ←/→ o los dígitos (0 = 10)".to_string(),
    };
    frame.render_widget(
        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted)),
        chunks[5],
    );
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let result = match &app.outcome {
        Some(Outcome::Scored(result)) => result,
        Some(Outcome::Failed(reason)) => {
            render_failed(frame, area, theme, reason);
            return;
        }
        None => return,
    };

    let rows = Layout::vertical([
        Constraint::Fill(1),   // Score + recommendations
        Constraint::Length(5), // Training banner
        Constraint::Length(1), // Submission status
    ])
    .split(area);

    let columns =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[0]);

    render_score_panel(frame, columns[0], theme, result);
    render_recommendations(frame, columns[1], app, result);
    render_training_banner(frame, rows[1], app);
    render_submission_status(frame, rows[2], app);
}

fn render_failed(frame: &mut Frame, area: Rect, theme: &ThemeColors, reason: &str) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No se pudo calcular el resultado",
            theme.header_style.fg(theme.error),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled(reason.to_string(), Style::default().fg(theme.muted))).centered(),
        Line::from(""),
        Line::from(Span::styled(
            "Pulsa r para empezar de nuevo",
            Style::default().fg(theme.text),
        ))
        .centered(),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn render_score_panel(frame: &mut Frame, area: Rect, theme: &ThemeColors, result: &TestResult) {
    let block = Block::bordered()
        .title(" Tu Puntuación ")
        .border_style(Style::default().fg(theme.popup_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1), // Gauge
        Constraint::Length(1),
        Constraint::Length(1), // Tier label
        Constraint::Length(1),
        Constraint::Fill(1),   // Interpretation
    ])
    .split(inner);

    let tier_color = theme.tier_color(result.tier);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(tier_color).bg(theme.bar_empty))
        .percent(u16::from(result.total_score.min(100)))
        .label(Span::styled(
            format!("{}%", result.total_score),
            Style::default().fg(theme.text).bold(),
        ));
    frame.render_widget(gauge, chunks[1]);

    let tier = Paragraph::new(Line::from(Span::styled(
        result.tier_label.as_str(),
        Style::default().fg(tier_color).bold(),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(tier, chunks[3]);

    let interpretation = Paragraph::new(result.interpretation.as_str())
        .style(Style::default().fg(theme.text))
        .wrap(Wrap { trim: true });
    frame.render_widget(interpretation, chunks[5]);
}

fn render_recommendations(frame: &mut Frame, area: Rect, app: &App, result: &TestResult) {
    let theme = &app.theme;
    let block = Block::bordered()
        .title(" Recomendaciones ")
        .border_style(Style::default().fg(theme.popup_border));

    let lines: Vec<Line> = if result.has_recommendations() {
        result
            .recommendations
            .iter()
            .enumerate()
            .skip(app.results_scroll as usize)
            .flat_map(|(idx, rec)| {
                [
                    Line::from(vec![
                        Span::styled(
                            format!("{:>2}. ", idx + 1),
                            Style::default().fg(theme.accent).bold(),
                        ),
                        Span::styled(rec.as_str(), Style::default().fg(theme.text)),
                    ]),
                    Line::from(""),
                ]
            })
            .collect()
    } else {
        vec![
            Line::from(""),
            Line::from(Span::styled(
                crate::output::NO_RECOMMENDATIONS_MESSAGE,
                Style::default().fg(theme.tier_high).bold(),
            ))
            .centered(),
        ]
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn render_training_banner(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let base = Style::default().fg(theme.banner_fg).bg(theme.banner_bg);
    let lines = vec![
        Line::from(Span::styled("Formación Recomendada", base.bold())).centered(),
        Line::from(Span::styled(
            "Basado en tu evaluación VUCA, te recomendamos nuestros programas de formación \
             especializados en cadena de suministro para fortalecer las áreas identificadas.",
            base,
        ))
        .centered(),
        Line::from(vec![
            Span::styled("o", base.fg(theme.banner_key).bold()),
            Span::styled(" Ver Programas de Formación  ", base),
            Span::styled(app.settings.contact.training_programs_url.as_str(), base.italic()),
        ])
        .centered(),
    ];
    frame.render_widget(
        Paragraph::new(lines).style(base).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_submission_status(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let (text, color) = match app.submission {
        SubmissionStatus::Disabled => ("Envío desactivado".to_string(), theme.muted),
        SubmissionStatus::Pending => (
            format!("{} Enviando reporte...", SPINNER[app.spinner_frame % SPINNER.len()]),
            theme.accent_alt,
        ),
        SubmissionStatus::Sent => ("Reporte enviado".to_string(), theme.flash_success),
        SubmissionStatus::Failed => (
            "No se pudo enviar el reporte (tus resultados no se pierden)".to_string(),
            theme.flash_error,
        ),
    };
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Right)
            .style(Style::default().fg(color)),
        area,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let lower = msg.to_lowercase();
        let msg_color = if lower.starts_with("no se pudo")
            || lower.starts_with("error")
            || lower.starts_with("revisa")
        {
            theme.flash_error
        } else {
            theme.flash_success
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.screen {
            Screen::Intro => &[("Enter", ":comenzar "), ("?", ":ayuda "), ("q", ":salir")],
            Screen::Respondent => &[
                ("Tab", ":campo "),
                ("Enter", ":continuar "),
                ("Esc", ":volver "),
                ("Ctrl-c", ":salir"),
            ],
            Screen::Questionnaire => &[
                ("←/→", ":valor "),
                ("1-0", ":elegir "),
                ("Enter", ":siguiente "),
                ("↑", ":anterior "),
                ("?", ":ayuda "),
                ("q", ":salir"),
            ],
            Screen::Results => &[
                ("o", ":formación "),
                ("s", ":guardar "),
                ("r", ":reiniciar "),
                ("?", ":ayuda "),
                ("q", ":salir"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::styled(*label, Style::default().fg(theme.muted)));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    // Clamp dimensions to area bounds
    let width = width.min(area.width);
    let height = height.min(area.height);

    // Calculate centered position
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(54, 17, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Atajos de teclado ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("Enter         ", "Comenzar / confirmar"),
        ("Tab / S-Tab   ", "Cambiar de campo"),
        ("← / →         ", "Ajustar la respuesta"),
        ("1-9, 0        ", "Elegir respuesta (0 = 10)"),
        ("↑ / Backspace ", "Pregunta anterior"),
        ("o             ", "Abrir programas de formación"),
        ("s             ", "Guardar el reporte"),
        ("r             ", "Reiniciar el diagnóstico"),
        ("j / k         ", "Desplazar recomendaciones"),
        ("?             ", "Mostrar esta ayuda"),
        ("q / Ctrl-c    ", "Salir"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(*key, key_style),
                Span::styled(*desc, Style::default().fg(theme.text)),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Pulsa cualquier tecla para cerrar",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
