use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::projection;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(10),   // Monthly bars
        ])
        .split(area);

    render_summary_cards(f, chunks[0], ledger);
    render_monthly_chart(f, chunks[1], ledger);
}

fn render_summary_cards(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let total = ledger.totals().grand_total();
    let (paid, open): (Vec<_>, Vec<_>) = ledger.records().iter().partition(|r| r.paid);
    let paid_sum: Decimal = paid.iter().map(|r| r.amount).sum();
    let open_sum: Decimal = open.iter().map(|r| r.amount).sum();

    render_card(
        f,
        cards[0],
        "Total",
        total,
        theme::ACCENT,
        format!("{} records", ledger.len()),
    );
    render_card(
        f,
        cards[1],
        "Paid",
        paid_sum,
        theme::GREEN,
        format!("{} records", paid.len()),
    );
    render_card(
        f,
        cards[2],
        "Open",
        open_sum,
        theme::RED,
        format!("{} records", open.len()),
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_monthly_chart(f: &mut Frame, area: Rect, ledger: &Ledger) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Monthly Expenses (R$) ", theme::title_style()));

    if ledger.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "Nothing to chart yet. Add an expense with :add",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let series = projection::chart_series(ledger.totals());
    let bars: Vec<Bar> = projection::chart_bars(ledger.totals())
        .into_iter()
        .zip(series)
        .map(|((label, value), total)| {
            Bar::default()
                .value(value)
                .text_value(total.round().to_string())
                .label(Line::from(label))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    // Twelve bars plus gaps must fit inside the borders.
    let inner = area.width.saturating_sub(2);
    let bar_width = (inner.saturating_sub(11) / 12).clamp(3, 9);

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
