use ratatui::{
    layout::{Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Clear, Dataset, GraphType, List,
        ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::app::{App, InputMode};
use crate::data::{self, Severity};
use crate::lang::Language;
use crate::state::{ChartKind, ChartSpec, ChatRole, MapLayer, Tab};

const CHART_ROW_HEIGHT: u16 = 12;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Normal => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Critical => Color::Red,
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, tab bar, body, footer
    let [header_area, tabs_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_tab_bar(app, frame, tabs_area);

    match app.active_tab() {
        Tab::Chat => render_chat_tab(app, frame, body_area),
        Tab::Map => render_map_tab(app, frame, body_area),
        Tab::Analytics => render_analytics_tab(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.show_language_picker {
        render_language_picker(app, frame, area);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" Springwell ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            "Mission Control for India's Water ",
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("[{}] ", app.model_name),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    for stat in data::QUICK_STATS {
        spans.push(Span::styled(
            format!(" {} ", stat.value),
            Style::default().fg(Color::White).bold(),
        ));
        spans.push(Span::styled(
            format!("{} ", stat.label),
            Style::default().fg(Color::Gray),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_tab_bar(app: &App, frame: &mut Frame, area: Rect) {
    let mut spans: Vec<Span> = Vec::new();
    for (idx, tab) in Tab::all().iter().enumerate() {
        let style = if *tab == app.active_tab() {
            Style::default().fg(Color::Black).bg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", idx + 1, tab.title()), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " INPUT ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let hints = if app.show_language_picker {
        vec![
            Span::styled(" j/k ", key_style),
            Span::styled(" choose ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled(" select ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" cancel ", label_style),
        ]
    } else if app.input_mode == InputMode::Editing {
        vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" stop typing ", label_style),
        ]
    } else {
        let mut hints = vec![
            Span::styled(" Tab/1-3 ", key_style),
            Span::styled(" view ", label_style),
            Span::styled(" i ", key_style),
            Span::styled(" ask ", label_style),
            Span::styled(" p ", key_style),
            Span::styled(" suggest ", label_style),
            Span::styled(" L ", key_style),
            Span::styled(" language ", label_style),
        ];
        match app.active_tab() {
            Tab::Chat => hints.extend(vec![
                Span::styled(" j/k ", key_style),
                Span::styled(" scroll ", label_style),
            ]),
            Tab::Map => hints.extend(vec![
                Span::styled(" j/k ", key_style),
                Span::styled(" states ", label_style),
                Span::styled(" g/r/s/n ", key_style),
                Span::styled(" layer ", label_style),
            ]),
            Tab::Analytics => hints.extend(vec![
                Span::styled(" j/k ", key_style),
                Span::styled(" charts ", label_style),
            ]),
        }
        hints.extend(vec![
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]);
        hints
    };

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_chat_tab(app: &mut App, frame: &mut Frame, area: Rect) {
    // Sidebar with alerts/suggestions on the left, conversation on the right
    let [sidebar_area, chat_area] =
        Layout::horizontal([Constraint::Length(34), Constraint::Min(0)]).areas(area);

    render_sidebar(app, frame, sidebar_area);

    let [transcript_area, input_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(3)]).areas(chat_area);

    render_transcript(app, frame, transcript_area);
    render_input(app, frame, input_area);
}

fn render_sidebar(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Recent Alerts ");

    let mut lines: Vec<Line> = Vec::new();
    for alert in data::RECENT_ALERTS {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {} ", alert.severity.label()),
                Style::default()
                    .fg(Color::Black)
                    .bg(severity_color(alert.severity)),
            ),
            Span::styled(format!(" {}", alert.time), Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(Span::styled(
            alert.location,
            Style::default().fg(Color::White).bold(),
        )));
        lines.push(Line::from(Span::styled(
            alert.message,
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        "Quick Actions (p to use)",
        Style::default().fg(Color::Cyan).bold(),
    )));
    for (idx, suggestion) in data::SUGGESTIONS.iter().enumerate() {
        let marker = if idx == app.suggestion_idx % data::SUGGESTIONS.len() {
            "> "
        } else {
            "  "
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, suggestion),
            Style::default().fg(Color::Gray),
        )));
    }

    let sidebar = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(sidebar, area);
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    app.chat_area = Some(area);
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let language = app.chat.language();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(
            " Assistant — {} ({}) ",
            language.native_name(),
            language.display_name()
        ));

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.chat.messages() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
            }
            ChatRole::Assistant => {
                lines.push(Line::from(Span::styled(
                    "Springwell:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
            }
        }
        for line in msg.text.lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::default());
    }

    if app.chat.is_sending() {
        lines.push(Line::from(Span::styled(
            "Springwell:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let total_lines = lines.len() as u16;

    let transcript = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(transcript, area);

    if total_lines > app.chat_height {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("^"))
            .end_symbol(Some("v"));
        let mut scrollbar_state =
            ScrollbarState::new(total_lines as usize).position(app.chat_scroll as usize);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let border_color = if editing { Color::Yellow } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Ask (i to type) ");

    // Horizontal scroll keeps the cursor visible in long drafts
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let visible_text: String = app
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = if app.input.is_empty() && !editing {
        Paragraph::new(app.chat.language().placeholder())
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
    } else {
        Paragraph::new(visible_text)
            .style(Style::default().fg(Color::Cyan))
            .block(block)
    };

    frame.render_widget(input, area);

    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_map_tab(app: &mut App, frame: &mut Frame, area: Rect) {
    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Length(38), Constraint::Min(0)]).areas(area);

    app.map_area = Some(list_area);

    let map = &app.dashboard.map;
    let list_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" States — {} ", map.active_layer.label()));

    let items: Vec<ListItem> = data::all_figures()
        .into_iter()
        .map(|figures| {
            let severity = match map.active_layer {
                MapLayer::Groundwater => Some(figures.groundwater),
                MapLayer::Rainfall => Some(figures.rainfall),
                MapLayer::Stress => Some(figures.stress),
                MapLayer::None => None,
            };

            let highlighted = map
                .highlighted_location
                .as_deref()
                .is_some_and(|name| name.eq_ignore_ascii_case(figures.name));

            let name_style = if highlighted {
                Style::default().fg(Color::Black).bg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::White)
            };

            let mut spans = vec![Span::styled(format!(" {:<24}", figures.name), name_style)];
            if let Some(severity) = severity {
                spans.push(Span::styled(
                    format!(" {} ", severity.label()),
                    Style::default().fg(severity_color(severity)),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(list_block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, list_area, &mut app.state_list);

    render_map_detail(app, frame, detail_area);
}

fn render_map_detail(app: &mut App, frame: &mut Frame, area: Rect) {
    let map = &app.dashboard.map;

    let [info_area, markers_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(8)]).areas(area);

    let info_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Groundwater Interactive Map ");

    let mut lines: Vec<Line> = Vec::new();

    if map.active_layer == MapLayer::None {
        lines.push(Line::from(Span::styled(
            "Select a layer to begin visualization (g/r/s).",
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            "Ask the AI to show you something!",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Details for the highlighted state, falling back to the list cursor
    let focus_name = map
        .highlighted_location
        .clone()
        .or_else(|| {
            app.state_list
                .selected()
                .and_then(|i| data::STATE_NAMES.get(i))
                .map(|s| s.to_string())
        });

    if let Some(name) = focus_name {
        match data::figures_for(&name) {
            Some(figures) => {
                lines.push(Line::from(Span::styled(
                    figures.name,
                    Style::default().fg(Color::Cyan).bold(),
                )));
                lines.push(Line::default());
                for (label, severity) in [
                    ("Groundwater", figures.groundwater),
                    ("Rainfall", figures.rainfall),
                    ("Water stress", figures.stress),
                ] {
                    lines.push(Line::from(vec![
                        Span::styled(format!("{:<14}", label), Style::default().fg(Color::Gray)),
                        Span::styled(
                            severity.label(),
                            Style::default().fg(severity_color(severity)).bold(),
                        ),
                    ]));
                }
            }
            None => {
                lines.push(Line::from(Span::styled(
                    format!("No data for \"{}\"", name),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    let info = Paragraph::new(lines).block(info_block).wrap(Wrap { trim: true });
    frame.render_widget(info, info_area);

    // Marker list below the detail pane
    let markers_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Markers ({}) ", map.markers.len()));

    if map.markers.is_empty() {
        let placeholder = Paragraph::new("No markers yet. Ask the assistant to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(markers_block);
        frame.render_widget(placeholder, markers_area);
        return;
    }

    let items: Vec<ListItem> = map
        .markers
        .iter()
        .map(|marker| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:.4}, {:.4} ", marker.lat, marker.lng),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(marker.popup.clone(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(markers_block), markers_area);
}

fn render_analytics_tab(app: &mut App, frame: &mut Frame, area: Rect) {
    let charts = &app.dashboard.charts;

    if charts.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Data Analytics Dashboard ");
        let placeholder = Paragraph::new(Text::from(vec![
            Line::default(),
            Line::from("This canvas is ready for your insights."),
            Line::default(),
            Line::from(Span::styled(
                "Try asking: \"Create a bar chart for rainfall in Maharashtra\"",
                Style::default().fg(Color::Green).italic(),
            )),
        ]))
        .style(Style::default().fg(Color::Gray))
        .block(block)
        .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, area);
        return;
    }

    // Two charts per row; j/k moves the first visible row
    let rows: Vec<&[ChartSpec]> = charts.chunks(2).collect();
    let visible_rows = (area.height / CHART_ROW_HEIGHT).max(1) as usize;
    let first_row = app.analytics_scroll.min(rows.len().saturating_sub(1));

    let mut y = area.y;
    for row in rows.iter().skip(first_row).take(visible_rows) {
        let height = CHART_ROW_HEIGHT.min(area.y + area.height - y);
        if height < 4 {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height);
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(row_area);

        render_chart(frame, left, &row[0]);
        if let Some(spec) = row.get(1) {
            render_chart(frame, right, spec);
        }
        y += height;
    }
}

fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let series = data::monthly_series(&spec.location, spec.kind);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", spec.title));

    match spec.kind {
        ChartKind::Bar => {
            let bars: Vec<Bar> = series
                .iter()
                .map(|(month, value)| {
                    Bar::default()
                        .label(Line::from(*month))
                        .value(*value as u64)
                        .style(Style::default().fg(Color::Blue))
                })
                .collect();

            let chart = BarChart::default()
                .block(block)
                .bar_width(4)
                .bar_gap(1)
                .data(BarGroup::default().bars(&bars));
            frame.render_widget(chart, area);
        }
        ChartKind::Line => {
            let points: Vec<(f64, f64)> = series
                .iter()
                .enumerate()
                .map(|(i, (_, value))| (i as f64, *value))
                .collect();

            let dataset = Dataset::default()
                .name(data::series_unit(spec.kind))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&points);

            let chart = Chart::new(vec![dataset])
                .block(block)
                .x_axis(
                    Axis::default()
                        .bounds([0.0, 11.0])
                        .labels(vec![
                            Line::from("Jan"),
                            Line::from("Jun"),
                            Line::from("Dec"),
                        ])
                        .style(Style::default().fg(Color::Gray)),
                )
                .y_axis(
                    Axis::default()
                        .bounds([-4.0, 0.0])
                        .labels(vec![
                            Line::from("-4m"),
                            Line::from("-2m"),
                            Line::from("0m"),
                        ])
                        .style(Style::default().fg(Color::Gray)),
                );
            frame.render_widget(chart, area);
        }
    }
}

fn render_language_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let languages = Language::all();

    // Centered popup
    let popup_width = 40.min(area.width.saturating_sub(4));
    let popup_height = (languages.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Select Language (Enter to select, Esc to cancel) ");

    let items: Vec<ListItem> = languages
        .iter()
        .map(|language| {
            let is_current = *language == app.chat.language();
            let prefix = if is_current { "* " } else { "  " };
            let style = if is_current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!(
                "{}{} ({})",
                prefix,
                language.native_name(),
                language.display_name()
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup_area, &mut app.language_picker_state);
}
