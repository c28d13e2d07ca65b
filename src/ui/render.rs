// ============================================================================
// Rendu de l'interface
// ============================================================================
// Dessine la page active au centre du terminal, puis la notification
// modale par-dessus si besoin.
//
// Layout d'une page (boîte centrée de taille fixe) :
//   ┌──────────── titre ────────────┐
//   │ contenu de la page            │
//   ├───────────────────────────────┤
//   │ [F2] History  [F3] About ...  │  <- boutons de navigation
//   └───────────────────────────────┘
//
// CONCEPTS RATATUI :
// 1. Immediate mode : tout est redessiné à chaque frame depuis App,
//    aucun widget ne garde d'état entre deux frames
// 2. Ordre de dessin = ordre d'empilement : la liste déroulante et la
//    notification sont dessinées en dernier, par-dessus le reste
// 3. Clear efface la zone avant un popup (sinon le texte dessous "transparaît")
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::pages::ABOUT_TEXT;
use crate::app::{App, ConverterPage, Focus, Notification, NotificationLevel, PageId};
use crate::ui::choice_field::FilterableChoiceField;

/// Taille de la boîte centrée d'une page
const PAGE_SIZE: (u16, u16) = (70, 24);

/// Nombre maximal de candidats affichés dans la liste déroulante
const DROPDOWN_ROWS: u16 = 6;

/// Largeur de la notification modale
const POPUP_WIDTH: u16 = 60;

/// Dessine l'interface complète
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let (min_width, min_height) = app.min_size;

    if size.width < min_width || size.height < min_height {
        render_too_small(frame, size, app.min_size);
        return;
    }

    let area = centered_rect(PAGE_SIZE.0, PAGE_SIZE.1, size);
    let page = app.active_page();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", page.title()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Contenu
            Constraint::Length(2), // Navigation
        ])
        .split(inner);

    match page {
        PageId::Converter => render_converter(frame, &app.converter, chunks[0]),
        PageId::History => render_history(frame, app, chunks[0]),
        PageId::About => render_about(frame, chunks[0]),
    }

    render_nav_footer(frame, page, chunks[1]);

    if let Some(notification) = &app.notification {
        render_notification(frame, notification, size);
    }
}

/// Rectangle de `width` x `height` centré dans `area` (borné à `area`)
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Message affiché quand le terminal est sous la taille minimale
fn render_too_small(frame: &mut Frame, area: Rect, min_size: (u16, u16)) {
    let text = vec![
        Line::from(Span::styled(
            "Terminal too small",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{}x{} (minimum {}x{})",
            area.width, area.height, min_size.0, min_size.1
        )),
    ];

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Page : Converter
// ============================================================================

fn render_converter(frame: &mut Frame, page: &ConverterPage, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // espace
            Constraint::Length(3), // Amount
            Constraint::Length(3), // From
            Constraint::Length(3), // To
            Constraint::Length(2), // bouton Convert
            Constraint::Length(2), // résultat
            Constraint::Min(0),
        ])
        .split(area);

    let field_width = 30;
    let amount_area = centered_rect(field_width, 3, rows[1]);
    let from_area = centered_rect(field_width, 3, rows[2]);
    let to_area = centered_rect(field_width, 3, rows[3]);

    render_input(frame, "Amount", &page.amount, page.focus == Focus::Amount, amount_area);
    render_input(frame, "From Currency", page.from.text(), page.focus == Focus::From, from_area);
    render_input(frame, "To Currency", page.to.text(), page.focus == Focus::To, to_area);

    let button = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" Convert   "),
        Span::styled("[Tab]", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::raw(" Next field"),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(button, rows[4]);

    let result = Paragraph::new(Line::from(Span::styled(
        page.result_text.as_str(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(result, rows[5]);

    // La liste déroulante est dessinée en dernier, par-dessus les autres champs
    match page.focus {
        Focus::From => render_dropdown(frame, &page.from, from_area, area),
        Focus::To => render_dropdown(frame, &page.to, to_area, area),
        Focus::Amount => {}
    }
}

/// Dessine un champ de saisie avec son libellé
fn render_input(frame: &mut Frame, label: &str, value: &str, focused: bool, area: Rect) {
    let border_color = if focused { Color::Green } else { Color::DarkGray };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {label} "));

    let mut spans = vec![Span::styled(value, Style::default().fg(Color::White))];
    if focused {
        spans.push(Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Dessine la liste filtrée sous le champ `anchor`, bornée à `bounds`
fn render_dropdown(frame: &mut Frame, field: &FilterableChoiceField, anchor: Rect, bounds: Rect) {
    if !field.dropdown().open {
        return;
    }

    let visible = field.visible();
    let rows = (visible.len() as u16).clamp(1, DROPDOWN_ROWS);
    let top = anchor.y + anchor.height;
    let bottom = bounds.y + bounds.height;
    if top >= bottom {
        return;
    }

    let area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height: (rows + 2).min(bottom - top),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    frame.render_widget(Clear, area);

    if visible.is_empty() {
        let paragraph = Paragraph::new(Span::styled("No match", Style::default().fg(Color::Gray)))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|code| ListItem::new(code.as_str())).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD));

    let mut state = ListState::default();
    state.select(Some(field.dropdown().highlighted));
    frame.render_stateful_widget(list, area, &mut state);
}

// ============================================================================
// Page : History
// ============================================================================

fn render_history(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let items: Vec<ListItem> = app
        .history
        .lines
        .iter()
        .skip(app.history.scroll)
        .map(|line| ListItem::new(line.as_str()))
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

// ============================================================================
// Page : About
// ============================================================================

fn render_about(frame: &mut Frame, area: Rect) {
    let mut text = vec![Line::from("")];
    for (i, line) in ABOUT_TEXT.iter().enumerate() {
        let style = if i == 0 {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        text.push(Line::from(Span::styled(*line, style)));
    }

    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Navigation et notification
// ============================================================================

/// Boutons de navigation de la page (table des transitions) + quitter
fn render_nav_footer(frame: &mut Frame, page: PageId, area: Rect) {
    let key_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    for target in page.nav_targets() {
        spans.push(Span::styled(format!("[F{}]", target.function_key()), key_style));
        spans.push(Span::raw(format!(" {}  ", target.nav_label())));
    }
    spans.push(Span::styled("[Ctrl+Q]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)));
    spans.push(Span::raw(" Quit"));

    let paragraph = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

/// Popup modale centrée
///
/// La hauteur suit le message : il est découpé à la largeur du popup avant
/// le rendu, et le bouton OK a sa propre ligne en bas, jamais rognée.
fn render_notification(frame: &mut Frame, notification: &Notification, screen: Rect) {
    let color = match notification.level {
        NotificationLevel::Warning => Color::Yellow,
        NotificationLevel::Error => Color::Red,
    };

    let width = POPUP_WIDTH.min(screen.width);
    let lines = wrap_message(&notification.message, width.saturating_sub(2) as usize);

    // Bordures (2) + message + ligne vide + bouton OK
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(4);
    let area = centered_rect(width, height, screen);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .title(format!(" {} ", notification.title))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Message
            Constraint::Length(2), // Bouton OK
        ])
        .split(inner);

    let message = Paragraph::new(lines.into_iter().map(Line::from).collect::<Vec<_>>())
        .alignment(Alignment::Center);

    let button = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" OK"),
        ]),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);
    frame.render_widget(message, chunks[0]);
    frame.render_widget(button, chunks[1]);
}

/// Découpe `message` en lignes d'au plus `width` caractères
///
/// Coupe entre les mots ; un mot plus long que `width` (ex: une URL) est
/// coupé en morceaux. Les retours à la ligne du message sont conservés.
fn wrap_message(message: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in message.lines() {
        let mut current = String::new();
        let mut current_len = 0;

        for word in paragraph.split_whitespace() {
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(width) {
                if current_len > 0 && current_len + 1 + chunk.len() > width {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(chunk);
                current_len += chunk.len();
            }
        }

        lines.push(current);
    }

    lines
}

// ============================================================================
// Tests
// ============================================================================
