use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table, Wrap},
};

use crate::app::{App, CreateFocus, FormField, InputMode, Page, PreviewTab};
use crate::form::{FetchStatus, InputSource, MAX_SCRIPT_CHARS, MIN_SCRIPT_CHARS};
use crate::login::AuthTab;
use crate::notify::Severity;
use crate::overview;
use crate::project::{Project, ProjectStatus};

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    if app.show_login {
        render_login(app, frame, area);
        render_toasts(app, frame, area);
        return;
    }

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [sidebar_area, content_area] =
        Layout::horizontal([Constraint::Length(24), Constraint::Min(0)]).areas(body_area);
    app.sidebar_area = Some(sidebar_area);
    render_sidebar(app, frame, sidebar_area);

    match app.page {
        Page::Overview => render_overview(frame, content_area),
        Page::Create => render_create(app, frame, content_area),
        Page::Projects => render_projects(app, frame, content_area),
    }

    render_footer(app, frame, footer_area);

    // Popups (in order of priority)
    if app.show_file_picker {
        render_file_picker(app, frame, area);
    } else if app.detail_project.is_some() {
        render_project_detail(app, frame, area);
    }

    render_toasts(app, frame, area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Science Video Creator ",
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            app.config.account_name().to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Menu ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [menu_area, account_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(inner);

    let items: Vec<ListItem> = Page::all()
        .iter()
        .enumerate()
        .map(|(i, page)| {
            let style = if *page == app.page {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(" {} {}", i + 1, page.label())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), menu_area);

    let account = Paragraph::new(vec![
        Line::from(Span::styled(
            app.config.account_name().to_string(),
            Style::default().bold(),
        )),
        Line::from(Span::styled(
            app.config.account_email().to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "a: account",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(account, account_area);
}

// ── Overview page ───────────────────────────────────────────────────────

fn render_overview(frame: &mut Frame, area: Rect) {
    let [stats_area, middle_area, usage_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .areas(area);

    // Stat cards in a row
    let stats = overview::stats();
    let columns = Layout::horizontal(vec![
        Constraint::Ratio(1, stats.len() as u32);
        stats.len()
    ])
    .split(stats_area);
    for (stat, column) in stats.iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(stat.value, Style::default().bold())),
            Line::from(vec![
                Span::styled(stat.change, Style::default().fg(Color::Green)),
                Span::styled(" from last month", Style::default().fg(Color::DarkGray)),
            ]),
        ])
        .block(Block::default().borders(Borders::ALL).title(stat.title));
        frame.render_widget(card, *column);
    }

    let [projects_area, activity_area] =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
            .areas(middle_area);

    // Recent projects with a progress bar each
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Recent Projects ");
    let inner = block.inner(projects_area);
    frame.render_widget(block, projects_area);

    let recent = overview::recent_projects();
    let rows = Layout::vertical(vec![Constraint::Length(2); recent.len()]).split(inner);
    for (project, row) in recent.iter().zip(rows.iter()) {
        let [label_area, gauge_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(*row);
        let views = if project.status == ProjectStatus::Completed {
            format!("  {} views", project.views)
        } else {
            String::new()
        };
        let label = Line::from(vec![
            Span::raw(project.title),
            Span::raw(" "),
            Span::styled(project.status.as_str(), status_style(project.status)),
            Span::styled(views, Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("  {}", project.date),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(label), label_area);
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(project.progress)
            .label(format!("{}%", project.progress));
        frame.render_widget(gauge, gauge_area);
    }

    // Activity feed
    let items: Vec<ListItem> = overview::activities()
        .iter()
        .map(|activity| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(activity.user, Style::default().bold()),
                    Span::raw(format!(" {} ", activity.action)),
                    Span::styled(activity.project, Style::default().bold()),
                ]),
                Line::from(Span::styled(
                    format!("  {}", activity.time),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    frame.render_widget(
        List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Recent Activity "),
        ),
        activity_area,
    );

    // Usage meters
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Resource Usage ");
    let inner = block.inner(usage_area);
    frame.render_widget(block, usage_area);
    let meters = overview::usage_meters();
    let rows = Layout::vertical(vec![Constraint::Length(1); meters.len()]).split(inner);
    for (meter, row) in meters.iter().zip(rows.iter()) {
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Blue))
            .percent(meter.percent)
            .label(format!("{}: {}", meter.label, meter.detail));
        frame.render_widget(gauge, *row);
    }
}

// ── Create page ─────────────────────────────────────────────────────────

fn render_create(app: &mut App, frame: &mut Frame, area: Rect) {
    let [form_area, preview_area] =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);
    app.form_area = Some(form_area);
    app.preview_area = Some(preview_area);

    render_form(app, frame, form_area);
    render_preview(app, frame, preview_area);
}

fn focus_marker(focused: bool) -> Span<'static> {
    if focused {
        Span::styled("▶ ", Style::default().fg(Color::Cyan))
    } else {
        Span::raw("  ")
    }
}

fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    let focused_pane = app.create_focus == CreateFocus::Form;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(focused_pane))
        .title(" Video Details ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [source_area, content_area, options_area, submit_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(6),
        Constraint::Length(4),
        Constraint::Length(1),
    ])
    .areas(inner);

    // Source tabs
    let mut spans = vec![focus_marker(app.form_focus == FormField::Source)];
    for source in InputSource::all() {
        let style = if source == app.form.source {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", source.label()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), source_area);

    match app.form.source {
        InputSource::Text => render_text_content(app, frame, content_area),
        InputSource::Url => render_url_content(app, frame, content_area),
        InputSource::File => render_file_content(app, frame, content_area),
    }

    // Option rows
    let option_rows = [
        (FormField::Style, "Style", app.form.options.style.display_name()),
        (
            FormField::Language,
            "Language",
            app.form.options.language.display_name(),
        ),
        (FormField::Voice, "Voice", app.form.options.voice.display_name()),
        (
            FormField::VisualStyle,
            "Visual Style",
            app.form.options.visual_style.display_name(),
        ),
    ];
    let rows = Layout::vertical(vec![Constraint::Length(1); option_rows.len()]).split(options_area);
    for ((field, label, value), row) in option_rows.iter().zip(rows.iter()) {
        let line = Line::from(vec![
            focus_marker(app.form_focus == *field),
            Span::raw(format!("{label:<13}")),
            Span::styled(
                format!("◀ {value} ▶"),
                Style::default().fg(Color::Cyan),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), *row);
    }

    // Submit row, disabled while the collaborator reports a pending request
    let submit_label = if app.is_generating {
        Span::styled(
            "[ Generating... ]",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(
            "[ Generate Video ]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };
    let line = Line::from(vec![focus_marker(app.form_focus == FormField::Submit), submit_label]);
    frame.render_widget(Paragraph::new(line), submit_area);
}

fn render_text_content(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let focused = app.form_focus == FormField::Content;
    let border = if app.form.text_error.is_some() {
        Style::default().fg(Color::Red)
    } else if editing {
        Style::default().fg(Color::Yellow)
    } else {
        pane_border(focused)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Detail Script ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, meta_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(2)]).areas(inner);

    let text = if app.form.script_text.is_empty() && !editing {
        Paragraph::new(Span::styled(
            "e.g., Detailed explanation of Quantum Mechanics",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        // While typing, keep the tail of the draft in view.
        let scroll = wrapped_line_count(&app.form.script_text, text_area.width)
            .saturating_sub(text_area.height);
        Paragraph::new(app.form.script_text.as_str())
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
    };
    frame.render_widget(text, text_area);

    let mut meta = vec![Line::from(Span::styled(
        format!(
            "{}/{} characters (minimum {})",
            app.form.script_text.chars().count(),
            MAX_SCRIPT_CHARS,
            MIN_SCRIPT_CHARS
        ),
        Style::default().fg(Color::DarkGray),
    ))];
    if let Some(err) = app.form.text_error {
        meta.push(error_line(err.to_string()));
    }
    frame.render_widget(Paragraph::new(meta), meta_area);
}

fn render_url_content(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border = if app.form.url_error.is_some() {
        Style::default().fg(Color::Red)
    } else if editing {
        Style::default().fg(Color::Yellow)
    } else {
        pane_border(app.form_focus == FormField::Content)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Script URL ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [input_area, status_area, fetched_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(inner);

    let url = if app.form.script_url.is_empty() && !editing {
        Span::styled(
            "e.g., https://docs.example.com/script",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(app.form.script_url.as_str())
    };
    frame.render_widget(Paragraph::new(Line::from(url)), input_area);

    let status = if app.form.fetch_status == FetchStatus::Fetching {
        Line::from(Span::styled(
            format!("Fetching{}", ellipsis(app.animation_frame)),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(err) = app.form.url_error {
        error_line(err.to_string())
    } else {
        Line::from(Span::styled(
            "f: fetch text",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(status), status_area);

    let fetched = if app.form.fetch_status == FetchStatus::Fetching {
        Paragraph::new(Span::styled(
            "Loading…",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL))
    } else if app.form.fetched_text.is_empty() {
        Paragraph::new(Span::styled(
            "Enter a URL above and press f to retrieve content",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL))
    } else {
        Paragraph::new(app.form.fetched_text.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Fetched Content "),
            )
    };
    frame.render_widget(fetched, fetched_area);
}

fn render_file_content(app: &App, frame: &mut Frame, area: Rect) {
    let border = if app.form.file_error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        pane_border(app.form_focus == FormField::Content)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Upload Script File ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::default(),
        Line::from(Span::raw("Press Enter to choose a file")).alignment(Alignment::Center),
        Line::from(Span::styled(
            "Supports PDF, DOC, DOCX (max 5MB)",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        Line::default(),
    ];
    if let Some(file) = &app.form.script_file {
        lines.push(
            Line::from(Span::styled(
                format!("{} ({} bytes)", file.name, file.size),
                Style::default().fg(Color::Blue),
            ))
            .alignment(Alignment::Center),
        );
    }
    if let Some(err) = app.form.file_error {
        lines.push(error_line(err.to_string()).alignment(Alignment::Center));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_preview(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.create_focus == CreateFocus::Preview;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(pane_border(focused))
        .title(" Preview Outputs ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(project) = &app.current_project else {
        let empty = Paragraph::new(vec![
            Line::default(),
            Line::from("No preview available").alignment(Alignment::Center),
            Line::from(Span::styled(
                "Generate a video to see the preview",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ]);
        frame.render_widget(empty, inner);
        return;
    };

    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(inner);

    let mut spans = Vec::new();
    for tab in PreviewTab::all() {
        let style = if tab == app.preview_tab {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" {} ", tab.label()), style));
    }
    spans.push(Span::styled(
        "  r: refresh",
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)), tabs_area);

    if app.is_refreshing {
        let busy = Paragraph::new(Span::styled(
            format!("Refreshing{}", ellipsis(app.animation_frame)),
            Style::default().fg(Color::Yellow),
        ));
        frame.render_widget(busy, body_area);
        return;
    }

    let body = match app.preview_tab {
        PreviewTab::Script => Paragraph::new(project.script.as_str())
            .wrap(Wrap { trim: false })
            .scroll((app.preview_scroll, 0)),
        PreviewTab::Audio => artifact_paragraph("Audio track", project.audio_url.as_deref()),
        PreviewTab::Visual => artifact_paragraph("Visual frame", project.visual_url.as_deref()),
        PreviewTab::Video => artifact_paragraph("Video file", project.video_url.as_deref()),
    };
    frame.render_widget(body, body_area);
}

fn artifact_paragraph<'a>(label: &'a str, url: Option<&'a str>) -> Paragraph<'a> {
    match url {
        Some(url) => Paragraph::new(vec![
            Line::default(),
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().bold()),
                Span::styled(url, Style::default().fg(Color::Blue)),
            ])
            .alignment(Alignment::Center),
        ]),
        None => Paragraph::new(vec![
            Line::default(),
            Line::from(Span::styled(
                "Not available",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        ]),
    }
}

// ── Projects page ───────────────────────────────────────────────────────

fn render_projects(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Video Projects ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [search_area, table_area, pager_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);
    app.table_area = Some(table_area);

    let search_style = if app.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search = Line::from(vec![
        Span::styled("Search: ", search_style),
        Span::raw(app.project_search.as_str()),
        Span::styled(
            if app.input_mode == InputMode::Editing {
                "▏"
            } else {
                "  (/ to search)"
            },
            search_style,
        ),
    ]);
    frame.render_widget(Paragraph::new(search), search_area);

    let visible: Vec<Project> = app.visible_projects().into_iter().cloned().collect();
    if visible.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No projects found",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(empty, table_area);
    } else {
        let header = Row::new(vec!["Project ID", "Topic", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = visible
            .iter()
            .map(|project| {
                Row::new(vec![
                    Cell::from(project.id.clone()),
                    Cell::from(truncated(&project.topic, 48)),
                    Cell::from(Span::styled(
                        project.status.as_str(),
                        status_style(project.status),
                    )),
                ])
            })
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
        frame.render_stateful_widget(table, table_area, &mut app.table_state);
    }

    let total = app.projects.total_pages(&app.project_search);
    let pager = Line::from(Span::styled(
        format!("Page {} of {total}   p: previous  n: next", app.project_page),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(pager), pager_area);
}

fn render_project_detail(app: &App, frame: &mut Frame, area: Rect) {
    let Some(project) = &app.detail_project else {
        return;
    };

    let popup_area = centered_rect(area, 56, 9);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Project Details (Esc to close) ");

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{label:<12}"), Style::default().bold()),
            Span::raw(value),
        ])
    };
    let lines = vec![
        field("ID:", project.id.clone()),
        field("Topic:", truncated(&project.topic, 40)),
        field("Status:", project.status.as_str().to_string()),
        field("Script ID:", project.script_id.clone()),
        field(
            "Video URL:",
            project
                .video_url
                .clone()
                .unwrap_or_else(|| "Not available".to_string()),
        ),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

// ── Account screen ──────────────────────────────────────────────────────

fn render_login(app: &App, frame: &mut Frame, area: Rect) {
    let fields = app.login.fields();
    let height = 10 + fields.len() as u16 * 3;
    let card_area = centered_rect(area, 56, height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Science Video Creator ");
    let inner = block.inner(card_area);
    frame.render_widget(Clear, card_area);
    frame.render_widget(block, card_area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(app.login.tab.title(), Style::default().bold()))
            .alignment(Alignment::Center),
        Line::from(Span::styled(
            app.login.tab.subtitle(),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        Line::default(),
    ];

    // Tab bar (forgot-password is reached from the login tab)
    if app.login.tab != AuthTab::Forgot {
        let tab_span = |tab: AuthTab, label: &'static str| {
            if app.login.tab == tab {
                Span::styled(
                    format!(" {label} "),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray))
            }
        };
        lines.push(
            Line::from(vec![
                tab_span(AuthTab::Login, "Login"),
                tab_span(AuthTab::Register, "Register"),
            ])
            .alignment(Alignment::Center),
        );
        lines.push(Line::default());
    }

    for field in fields {
        let focused = app.login.focused_field() == *field;
        let marker = focus_marker(focused);
        let value = app.login.value(*field);
        let shown = if field.is_secret() {
            "•".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        lines.push(Line::from(vec![
            marker,
            Span::styled(format!("{:<18}", field.label()), Style::default().bold()),
            Span::raw(shown),
            Span::styled(if focused { "▏" } else { "" }, Style::default().fg(Color::Yellow)),
        ]));
        if let Some(message) = app.login.errors.get(field) {
            lines.push(Line::from(vec![Span::raw("  "), error_span(message)]));
        } else {
            lines.push(Line::default());
        }
    }

    let action = if app.auth_busy {
        match app.login.tab {
            AuthTab::Login => format!("Signing in{}", ellipsis(app.animation_frame)),
            AuthTab::Register => format!("Creating account{}", ellipsis(app.animation_frame)),
            AuthTab::Forgot => format!("Sending instructions{}", ellipsis(app.animation_frame)),
        }
    } else {
        match app.login.tab {
            AuthTab::Login => "Enter: sign in".to_string(),
            AuthTab::Register => "Enter: create account".to_string(),
            AuthTab::Forgot => "Enter: send reset instructions".to_string(),
        }
    };
    lines.push(Line::from(Span::styled(action, Style::default().fg(Color::Green))).alignment(Alignment::Center));
    lines.push(
        Line::from(Span::styled(
            match app.login.tab {
                AuthTab::Forgot => "Esc: back to login",
                _ => "←/→: switch tab  Ctrl-F: forgot password  Esc: back",
            },
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    );
    lines.push(
        Line::from(Span::styled(
            "By continuing, you agree to our Terms of Service and Privacy Policy",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
    );

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}

// ── Popups and chrome ───────────────────────────────────────────────────

fn render_file_picker(app: &App, frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(area, 60, 5);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Upload Script File (Enter to select, Esc to cancel) ");
    let lines = vec![
        Line::from(vec![
            Span::raw("Path: "),
            Span::raw(app.file_input.as_str()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            "Supports PDF, DOC, DOCX (max 5MB)",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), popup_area);
}

fn render_toasts(app: &App, frame: &mut Frame, area: Rect) {
    if app.toasts.is_empty() {
        return;
    }

    let width = 44.min(area.width.saturating_sub(2));
    let mut y = area.y + 1;
    for toast in app.toasts.visible() {
        let height = 4;
        if y + height > area.bottom() {
            break;
        }
        let toast_area = Rect::new(area.right().saturating_sub(width + 1), y, width, height);
        frame.render_widget(Clear, toast_area);

        let color = match toast.severity {
            Severity::Default => Color::Green,
            Severity::Destructive => Color::Red,
        };
        let body = Paragraph::new(Text::from(toast.description.as_str()))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", toast.title)),
            );
        frame.render_widget(body, toast_area);
        y += height;
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let hint = if app.input_mode == InputMode::Editing {
        match app.page {
            Page::Projects => "type to search  Esc/Enter: done",
            _ => "type to edit  Esc: done",
        }
    } else {
        match (app.page, app.create_focus) {
            (Page::Overview, _) => "1/2/3: pages  a: account  q: quit",
            (Page::Create, CreateFocus::Form) => {
                "j/k: rows  h/l: adjust  Enter: edit/apply  f: fetch  Tab: preview  q: quit"
            }
            (Page::Create, CreateFocus::Preview) => {
                "h/l: tabs  j/k: scroll  r: refresh  Tab: form  q: quit"
            }
            (Page::Projects, _) => {
                "/: search  j/k: rows  Enter: details  e: edit  x: export  p/n: page  q: quit"
            }
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(format!(" {hint}"), Style::default().fg(Color::DarkGray))),
        area,
    );
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn pane_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn status_style(status: ProjectStatus) -> Style {
    match status {
        ProjectStatus::Completed => Style::default().fg(Color::Green),
        ProjectStatus::Processing => Style::default().fg(Color::Blue),
        ProjectStatus::Draft => Style::default().fg(Color::DarkGray),
    }
}

fn error_line(message: String) -> Line<'static> {
    Line::from(error_span(&message))
}

fn error_span(message: &str) -> Span<'static> {
    Span::styled(format!("✗ {message}"), Style::default().fg(Color::Red))
}

fn ellipsis(frame: u8) -> &'static str {
    match frame % 3 {
        0 => ".",
        1 => "..",
        _ => "...",
    }
}

fn truncated(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

/// Number of terminal rows `text` occupies when wrapped to `width` columns.
/// Character counts, not byte lengths, for UTF-8 safety.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    let mut lines = 0u16;
    for line in text.lines() {
        let chars = line.chars().count();
        lines = lines.saturating_add(((chars / width) + 1) as u16);
    }
    lines.max(1)
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncated_respects_char_boundaries() {
        assert_eq!(truncated("short", 10), "short");
        assert_eq!(truncated("ábcdéfghij", 5), "ábcd…");
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count(&"a".repeat(25), 10), 3);
        assert_eq!(wrapped_line_count("a\nb", 10), 2);
        assert_eq!(wrapped_line_count("abc", 0), 0);
    }

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let popup = centered_rect(area, 56, 9);
        assert!(popup.width <= area.width);
        assert!(popup.x + popup.width <= area.width);
        assert!(popup.y + popup.height <= area.height);
    }

    #[test]
    fn test_ellipsis_cycles() {
        assert_eq!(ellipsis(0), ".");
        assert_eq!(ellipsis(1), "..");
        assert_eq!(ellipsis(2), "...");
        assert_eq!(ellipsis(3), ".");
    }
}
