use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::category::CATEGORIES;
use crate::render::Card;

use super::app::{App, FetchState, Focus, SKELETON_CARDS};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header with counter
            Constraint::Length(1), // Status line
            Constraint::Min(0),    // Filter pane + card grid
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);
    draw_status(f, chunks[1], app);
    draw_main(f, chunks[2], app);
    draw_footer(f, chunks[3]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Free Model Explorer ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| free models: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.displayed_count_text(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    f.render_widget(header, area);
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let color = match app.state {
        FetchState::Failed => Color::Red,
        FetchState::Loading => Color::Yellow,
        _ => Color::DarkGray,
    };
    let status = Paragraph::new(format!(" {}", app.status)).style(Style::default().fg(color));
    f.render_widget(status, area);
}

fn draw_main(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(22), Constraint::Percentage(78)])
        .split(area);

    draw_filters(f, chunks[0], app);
    draw_cards(f, chunks[1], app);
}

fn draw_filters(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Filters {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut items: Vec<ListItem> = Vec::with_capacity(app.filter_list_len());
    items.push(ListItem::new(format!("All ({})", app.dataset_len())).style(Style::default().fg(Color::Green)));
    for category in CATEGORIES {
        items.push(ListItem::new(category.as_str()));
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Use Case "),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected_filter));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App) {
    let border_style = if app.focus == Focus::Cards {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let items: Vec<ListItem> = if app.state == FetchState::Loading {
        (0..SKELETON_CARDS)
            .map(|_| {
                ListItem::new(vec![
                    Line::from("░░░░░░░░░░░░░░░░░░░░░░░░"),
                    Line::from("░░░░░░░░░░░░"),
                    Line::from(""),
                ])
                .style(Style::default().fg(Color::DarkGray))
            })
            .collect()
    } else {
        app.cards().iter().map(card_item).collect()
    };

    let title = format!(" Models ({}) ", app.cards().len());
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(title),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let selected = if app.cards().is_empty() {
        None
    } else {
        Some(app.selected_card)
    };
    let mut state = ListState::default().with_selected(selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn card_item(card: &Card) -> ListItem<'_> {
    let difficulty_color = match card.difficulty.tag() {
        "beginner" => Color::Green,
        "intermediate" => Color::Yellow,
        _ => Color::Red,
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                card.display_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("{} {}", card.provider_logo, card.provider_label),
                Style::default().fg(Color::Blue),
            ),
            Span::raw("  "),
            Span::styled(card.difficulty.label(), Style::default().fg(difficulty_color)),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", card.category),
                Style::default().fg(Color::Magenta),
            ),
        ]),
        Line::from(vec![
            Span::styled(card.id_line.as_str(), Style::default().fg(Color::DarkGray)),
            Span::raw("  "),
            Span::styled(card.context_line.as_str(), Style::default().fg(Color::DarkGray)),
        ]),
    ];

    if !card.use_cases.is_empty() {
        lines.push(Line::from(Span::raw(card.use_cases.join("  "))));
    }
    lines.push(Line::from(Span::styled(
        card.link.as_str(),
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(""));

    ListItem::new(lines)
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " j/k navigate  h/l focus  r refresh  o open  c copy id  q quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(footer, area);
}
