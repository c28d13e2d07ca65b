// ============================================================================
// Dispatch des événements clavier
// ============================================================================
// Traduit un événement en appel de méthode sur App, selon le contexte :
//
// 1. Ctrl+Q / Ctrl+C : quitter, toujours
// 2. Notification ouverte : modale, seules Entrée/Échap/Espace la ferment
// 3. F1 / F2 / F3 : navigation, sur toutes les pages
// 4. Touches propres à la page active
//
// CONCEPT RUST : emprunts disjoints
// - `let page = &mut app.converter` emprunte UN champ de App
// - On peut ensuite appeler app.convert() : l'emprunt de `page` n'est plus
//   utilisé après ce point (non-lexical lifetimes)
// ============================================================================

use tracing::{debug, info};

use crate::app::{App, Focus, PageId};
use crate::ui::events::{
    get_char_from_event, is_backspace_event, is_backtab_event, is_down_event, is_enter_event,
    is_escape_event, is_quit_event, is_space_event, is_tab_event, is_up_event,
    page_from_function_key, Event,
};

/// Traite un événement et met à jour l'état de l'application
pub fn handle_event(app: &mut App, event: Event) {
    if matches!(event, Event::Tick) {
        return;
    }

    if is_quit_event(&event) {
        info!("User requested quit");
        app.quit();
        return;
    }

    if app.has_notification() {
        if is_enter_event(&event) || is_escape_event(&event) || is_space_event(&event) {
            debug!("Notification dismissed");
            app.dismiss_notification();
        }
        return;
    }

    if let Some(target) = page_from_function_key(&event) {
        info!(?target, "User navigated with function key");
        app.navigate(target);
        return;
    }

    match app.active_page() {
        PageId::Converter => handle_converter_event(app, &event),
        PageId::History | PageId::About => handle_static_page_event(app, &event),
    }
}

/// Touches de la page Converter
fn handle_converter_event(app: &mut App, event: &Event) {
    let page = &mut app.converter;

    if is_tab_event(event) {
        page.set_focus(page.focus.next());
    } else if is_backtab_event(event) {
        page.set_focus(page.focus.previous());
    } else if is_up_event(event) {
        if let Some(field) = page.focused_choice_mut() {
            field.highlight_previous();
        }
    } else if is_down_event(event) {
        if let Some(field) = page.focused_choice_mut() {
            field.highlight_next();
        }
    } else if is_escape_event(event) {
        if let Some(field) = page.focused_choice_mut() {
            field.close_dropdown();
        }
    } else if is_enter_event(event) {
        // Entrée valide d'abord la sélection de la liste déroulante,
        // sinon elle lance la conversion
        let accepted = page
            .focused_choice_mut()
            .is_some_and(|field| field.accept_highlighted());
        if !accepted {
            info!("User submitted conversion");
            app.convert();
        }
    } else if is_backspace_event(event) {
        match page.focused_choice_mut() {
            Some(field) => field.backspace(),
            None => {
                page.amount.pop();
            }
        }
    } else if let Some(c) = get_char_from_event(event) {
        let focus = page.focus;
        match focus {
            Focus::Amount => page.amount.push(c),
            // Les codes devises ne contiennent que des lettres et chiffres
            Focus::From | Focus::To if c.is_alphanumeric() => {
                if let Some(field) = page.focused_choice_mut() {
                    field.push_char(c);
                }
            }
            Focus::From | Focus::To => debug!(%c, "Ignored character in currency field"),
        }
    }
}

/// Touches des pages History et About
fn handle_static_page_event(app: &mut App, event: &Event) {
    if is_up_event(event) {
        app.history.scroll_up();
        return;
    }
    if is_down_event(event) {
        app.history.scroll_down();
        return;
    }

    match get_char_from_event(event) {
        Some('c') | Some('C') => app.navigate(PageId::Converter),
        Some('h') | Some('H') => app.navigate(PageId::History),
        Some('a') | Some('A') => app.navigate(PageId::About),
        Some('k') => app.history.scroll_up(),
        Some('j') => app.history.scroll_down(),
        Some('q') | Some('Q') => {
            info!("User requested quit");
            app.quit();
        }
        _ => {}
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_full_conversion_with_keyboard() {
        let mut app = test_app();

        type_text(&mut app, "10");
        handle_event(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "us");
        // Entrée accepte "USD" dans la liste déroulante
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.converter.from.text(), "USD");
        assert!(app.session.history.is_empty());

        handle_event(&mut app, key(KeyCode::Tab));
        type_text(&mut app, "eur");
        handle_event(&mut app, key(KeyCode::Esc));
        // Liste fermée : Entrée lance la conversion
        handle_event(&mut app, key(KeyCode::Enter));

        assert_eq!(app.converter.result_text, "10.0 USD = 9.0 EUR");
        assert_eq!(app.session.history.len(), 1);
    }

    #[test]
    fn test_typing_filters_dropdown() {
        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::Tab));

        type_text(&mut app, "i");
        assert_eq!(app.converter.from.visible(), ["INR"]);
        assert!(app.converter.from.dropdown().open);

        handle_event(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.converter.from.visible().len(), 3);

        // Caractères non alphanumériques ignorés
        type_text(&mut app, "/-");
        assert_eq!(app.converter.from.text(), "");
    }

    #[test]
    fn test_notification_is_modal() {
        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.has_notification());

        // Les autres touches sont ignorées tant que la notification est ouverte
        type_text(&mut app, "5");
        handle_event(&mut app, key(KeyCode::F(2)));
        assert_eq!(app.converter.amount, "");
        assert_eq!(app.active_page(), PageId::Converter);

        handle_event(&mut app, key(KeyCode::Esc));
        assert!(!app.has_notification());
    }

    #[test]
    fn test_function_keys_navigate() {
        let mut app = test_app();

        handle_event(&mut app, key(KeyCode::F(2)));
        assert_eq!(app.active_page(), PageId::History);
        assert_eq!(app.history.lines, vec!["No conversions yet."]);

        handle_event(&mut app, key(KeyCode::F(3)));
        assert_eq!(app.active_page(), PageId::About);

        handle_event(&mut app, key(KeyCode::F(1)));
        assert_eq!(app.active_page(), PageId::Converter);
    }

    #[test]
    fn test_letter_navigation_on_static_pages() {
        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::F(3)));

        handle_event(&mut app, key(KeyCode::Char('h')));
        assert_eq!(app.active_page(), PageId::History);

        handle_event(&mut app, key(KeyCode::Char('c')));
        assert_eq!(app.active_page(), PageId::Converter);

        // Sur Converter, les lettres sont de la saisie
        handle_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.active_page(), PageId::Converter);
        assert_eq!(app.converter.amount, "a");
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.is_running());

        handle_event(&mut app, Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!app.is_running());

        let mut app = test_app();
        handle_event(&mut app, key(KeyCode::F(2)));
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.is_running());
    }
}
