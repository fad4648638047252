use chrono::{DateTime, Local, Utc};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, Cell, Gauge, List, ListItem, ListState,
        Paragraph, Row, Table, Wrap,
        canvas::{Canvas, Context, Line as CanvasLine, Points},
    },
};
use wastewizard_core::{
    map::{MapPoint, bounds, map_points},
    metrics::classify_all,
    model::{BinReading, GeoPoint, Scorecards, Snapshot, Summary},
};

use crate::app::{App, Screen};

/// Degrees of empty space kept around the outermost map marker.
const MAP_PADDING: f64 = 0.002;

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    let header_text = match (&app.selected_deployment, &app.snapshot) {
        (Some(meta), Some(snapshot)) => format!(
            "Real-time monitoring of {} · sampled {}",
            meta.name,
            snapshot
                .taken_at
                .with_timezone(&Local)
                .format("%H:%M:%S")
        ),
        (Some(meta), None) => format!("Real-time monitoring of {}", meta.name),
        _ => "Demonstration dashboard with sample data, not connected to live bins".to_owned(),
    };
    let header = Paragraph::new(header_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("WasteWizard Remote Monitoring Dashboard"),
    );
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::DeploymentSelect => draw_deployment_select(frame, app, *content_area),
        Screen::Dashboard => draw_dashboard(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::DeploymentSelect => "↑/↓ move · Enter/Space open dashboard · q/Ctrl-C quit",
        Screen::Dashboard => "u/Enter simulate live data update · Esc/←/b back · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Fetching new data… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(msg) = &app.info_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else if app.info_message.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_deployment_select(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let items = app
        .deployments
        .iter()
        .enumerate()
        .map(|(idx, meta)| {
            let prefix = if idx == app.deployment_list_index {
                "> "
            } else {
                "  "
            };
            ListItem::new(format!("{prefix}{} ({} bins)", meta.name, meta.bins.len()))
        })
        .collect::<Vec<ListItem<'_>>>();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Select deployment (↑/↓, Enter)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.deployments.is_empty() {
        state.select(Some(app.deployment_list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_dashboard(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(snapshot) = &app.snapshot else {
        let text = if app.is_loading {
            "Loading readings…"
        } else {
            "No readings yet. Press u to take a sample."
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title("Smart Bin Status"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let table_height = u16::try_from(snapshot.readings.len())
        .unwrap_or(u16::MAX)
        .saturating_add(3);

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),            // key metrics
            Constraint::Length(table_height), // status table
            Constraint::Min(8),               // chart + map
            Constraint::Length(3),            // gauges
            Constraint::Length(3),            // scorecards
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [metrics_area, table_area, visual_area, gauge_area, score_area] = chunks else {
        return;
    };

    draw_metrics(frame, &snapshot.summary, *metrics_area);
    draw_status_table(frame, snapshot, *table_area);

    let visual_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(*visual_area);
    if let [chart_area, map_area] = visual_chunks.as_ref() {
        draw_fill_chart(frame, &snapshot.readings, *chart_area);
        draw_map(frame, &snapshot.readings, &app.route, *map_area);
    }

    draw_gauges(frame, &snapshot.readings, *gauge_area);
    draw_scorecards(frame, app.scorecards, *score_area);
}

fn draw_metrics(frame: &mut Frame<'_>, summary: &Summary, area: Rect) {
    let cards = [
        ("Average Fill Level (%)", summary.average_fill),
        ("Average Temperature (°C)", summary.average_temperature),
        ("Average Humidity (%)", summary.average_humidity),
    ];
    let cards = cards.map(|(title, value)| {
        let text = value.map_or_else(|| "–".to_owned(), |avg| format!("{avg:.2}"));
        (title, text)
    });
    draw_cards(frame, area, cards);
}

fn draw_scorecards(frame: &mut Frame<'_>, scorecards: Scorecards, area: Rect) {
    draw_cards(
        frame,
        area,
        [
            (
                "Collection Frequency",
                format!("{} times/week", scorecards.collection_frequency_per_week),
            ),
            (
                "Route Optimization",
                format!("{}%", scorecards.route_optimization_percent),
            ),
            (
                "Waste Reduction",
                format!("{}%", scorecards.waste_reduction_percent),
            ),
        ],
    );
}

fn draw_cards(frame: &mut Frame<'_>, area: Rect, cards: [(&str, String); 3]) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    for ((title, value), column) in cards.into_iter().zip(columns.iter()) {
        let card = Paragraph::new(value)
            .alignment(Alignment::Center)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(card, *column);
    }
}

fn draw_status_table(frame: &mut Frame<'_>, snapshot: &Snapshot, area: Rect) {
    let now = snapshot.taken_at;

    let rows = classify_all(&snapshot.readings).map(|(reading, band, color)| {
        Row::new(vec![
            Cell::from(reading.bin_id.to_string()),
            Cell::from(format!("{:>3}", reading.fill_percent)),
            Cell::from(band.label()),
            Cell::from(format!("{:.2}", reading.temperature_c)),
            Cell::from(format!("{:.2}", reading.humidity_percent)),
            Cell::from(emptied_label(reading.last_emptied, now)),
            Cell::from(format!("{:.4}", reading.latitude)),
            Cell::from(format!("{:.4}", reading.longitude)),
        ])
        .style(Style::default().fg(named_color(color)))
    });

    let column_widths = [
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Min(22),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec![
                "Bin ID",
                "Fill (%)",
                "Band",
                "Temp (°C)",
                "Humidity (%)",
                "Last Emptied",
                "Latitude",
                "Longitude",
            ])
            .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Smart Bin Status"),
        )
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn draw_fill_chart(frame: &mut Frame<'_>, readings: &[BinReading], area: Rect) {
    let bars: Vec<Bar<'_>> = classify_all(readings)
        .map(|(reading, _, color)| {
            let style = Style::default().fg(named_color(color));
            Bar::default()
                .value(u64::from(reading.fill_percent))
                .text_value(format!("{}%", reading.fill_percent))
                .label(Line::from(reading.bin_id.to_string()))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Trash Bin Fill Levels"),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(2)
        .max(100);

    frame.render_widget(chart, area);
}

fn draw_map(frame: &mut Frame<'_>, readings: &[BinReading], route: &[GeoPoint], area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Smart Bin Locations");

    let points = match map_points(readings) {
        Ok(points) => points,
        Err(err) => {
            let message = Paragraph::new(format!("Error displaying map: {err}"))
                .style(Style::default().fg(Color::Red))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }
    };

    let positions: Vec<GeoPoint> = points
        .iter()
        .map(|point| point.position)
        .chain(route.iter().copied())
        .collect();

    let Some((south_west, north_east)) = bounds(&positions, MAP_PADDING) else {
        let message = Paragraph::new("No bins to display").block(block);
        frame.render_widget(message, area);
        return;
    };

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([south_west.longitude, north_east.longitude])
        .y_bounds([south_west.latitude, north_east.latitude])
        .paint(|ctx| {
            for segment in route.windows(2) {
                if let [from, to] = segment {
                    ctx.draw(&CanvasLine::new(
                        from.longitude,
                        from.latitude,
                        to.longitude,
                        to.latitude,
                        Color::Blue,
                    ));
                }
            }
            ctx.layer();
            for point in &points {
                draw_marker(ctx, point);
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_marker(ctx: &mut Context<'_>, point: &MapPoint) {
    let color = named_color(point.band.color());
    let GeoPoint {
        latitude,
        longitude,
    } = point.position;
    ctx.draw(&Points {
        coords: &[(longitude, latitude)],
        color,
    });
    ctx.print(
        longitude,
        latitude,
        Span::styled(format!(" {}", point.bin_id), Style::default().fg(color)),
    );
}

fn draw_gauges(frame: &mut Frame<'_>, readings: &[BinReading], area: Rect) {
    if readings.is_empty() {
        return;
    }
    let count = u32::try_from(readings.len()).unwrap_or(u32::MAX);
    let constraints = readings
        .iter()
        .map(|_| Constraint::Ratio(1, count))
        .collect::<Vec<_>>();

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((reading, _, color), column) in classify_all(readings).zip(columns.iter()) {
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Fill Level - {}", reading.bin_id)),
            )
            .gauge_style(Style::default().fg(named_color(color)))
            .percent(u16::from(reading.fill_percent.min(100)))
            .label(format!("{}%", reading.fill_percent));
        frame.render_widget(gauge, *column);
    }
}

/// Terminal color for a band color name.
fn named_color(name: &str) -> Color {
    match name {
        "green" => Color::Rgb(0, 128, 0),
        "lime" => Color::Rgb(0, 255, 0),
        "yellowgreen" => Color::Rgb(154, 205, 50),
        "yellow" => Color::Rgb(255, 255, 0),
        "orange" => Color::Rgb(255, 165, 0),
        "red" => Color::Rgb(255, 0, 0),
        _ => Color::White,
    }
}

fn emptied_label(last_emptied: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let local = last_emptied.with_timezone(&Local).format("%d.%m. %H:%M");
    let hours = (now - last_emptied).num_hours();
    match hours {
        0 => format!("{local} (just now)"),
        1 => format!("{local} (1 hour ago)"),
        hours if hours > 1 => format!("{local} ({hours} hours ago)"),
        _ => local.to_string(),
    }
}
