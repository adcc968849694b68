use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::projection;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    if ledger.is_empty() {
        render_empty(f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    render_table(f, chunks[0], app, ledger);
    render_month_summary(f, chunks[1], app, ledger);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = vec![
        Line::from(""),
        Line::from(Span::styled("No expenses yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Press a or type :add <month> <installments> <amount> <description>",
            theme::dim_style(),
        )),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::dim_style())
        .title(Span::styled(" Expenses (0) ", theme::title_style()));
    f.render_widget(Paragraph::new(msg).centered().block(block), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let header_cells = ["Month", "ID", "Description", "Amount", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let groups = projection::group_by_month(ledger.records());

    // Flatten to (display index, month label shown on first row of its group, record)
    let flat: Vec<_> = groups
        .iter()
        .flat_map(|g| {
            g.records
                .iter()
                .enumerate()
                .map(move |(j, rec)| (if j == 0 { g.month.as_str() } else { "" }, *rec))
        })
        .enumerate()
        .collect();

    let rows: Vec<Row> = flat
        .iter()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, (month_label, rec))| {
            let is_cursor = *i == app.expense_index;
            let (status, status_style) = if rec.paid {
                ("paid", theme::dim_style())
            } else {
                ("open", theme::unpaid_style())
            };

            let style = if is_cursor {
                theme::selected_style()
            } else if rec.paid {
                theme::paid_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(*month_label),
                Cell::from(rec.id.to_string()),
                Cell::from(truncate(&rec.description, 48)),
                Cell::from(format_amount(rec.amount)),
                Cell::from(Span::styled(status, status_style)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(15),
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::dim_style())
            .title(Span::styled(
                format!(" Expenses ({}) ", ledger.len()),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}

fn render_month_summary(f: &mut Frame, area: Rect, app: &App, ledger: &Ledger) {
    let line = match app.selected_month(ledger) {
        Some(month) => {
            let total = ledger.totals().get(month.index());
            let unpaid: Decimal = ledger
                .records()
                .iter()
                .filter(|r| r.month == month.index() && !r.paid)
                .map(|r| r.amount)
                .sum();
            Line::from(vec![
                Span::styled(format!(" {month}: "), theme::title_style()),
                Span::styled(format!("total {}", format_amount(total)), theme::normal_style()),
                Span::styled("  |  ", theme::dim_style()),
                Span::styled(format!("open {}", format_amount(unpaid)), theme::unpaid_style()),
            ])
        }
        None => Line::from(Span::styled(" No expense selected", theme::dim_style())),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::dim_style());
    f.render_widget(Paragraph::new(line).block(block), area);
}
