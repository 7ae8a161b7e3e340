use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, CreateFocus, FormField, InputMode, Page};
use crate::form::{InputSource, Language, Style, VisualStyle, Voice};
use crate::login::AuthTab;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => app.tick(),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global quit, works everywhere
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    if app.show_file_picker {
        handle_file_picker(app, key);
        return;
    }
    if app.show_login {
        handle_login(app, key);
        return;
    }
    if app.detail_project.is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
            app.detail_project = None;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    // Keys shared by every page
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('1') => {
            app.select_page(Page::Overview);
            return;
        }
        KeyCode::Char('2') => {
            app.select_page(Page::Create);
            return;
        }
        KeyCode::Char('3') => {
            app.select_page(Page::Projects);
            return;
        }
        KeyCode::Char('a') => {
            app.open_login();
            return;
        }
        _ => {}
    }

    match app.page {
        Page::Overview => {}
        Page::Create => handle_create_normal(app, key),
        Page::Projects => handle_projects_normal(app, key),
    }
}

fn handle_create_normal(app: &mut App, key: KeyEvent) {
    // Tab flips between the form and the preview pane
    if key.code == KeyCode::Tab {
        app.create_focus = match app.create_focus {
            CreateFocus::Form => CreateFocus::Preview,
            CreateFocus::Preview => CreateFocus::Form,
        };
        return;
    }

    match app.create_focus {
        CreateFocus::Form => handle_form_keys(app, key),
        CreateFocus::Preview => handle_preview_keys(app, key),
    }
}

fn handle_form_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.form_focus = app.form_focus.next(),
        KeyCode::Char('k') | KeyCode::Up => app.form_focus = app.form_focus.prev(),

        KeyCode::Char('h') | KeyCode::Left => cycle_focused(app, -1),
        KeyCode::Char('l') | KeyCode::Right => cycle_focused(app, 1),

        // Fetch is explicit, never implied by typing
        KeyCode::Char('f') => {
            if app.form.source == InputSource::Url {
                app.start_fetch();
            }
        }

        KeyCode::Enter => match app.form_focus {
            FormField::Source => cycle_focused(app, 1),
            FormField::Content => match app.form.source {
                InputSource::Text | InputSource::Url => app.input_mode = InputMode::Editing,
                InputSource::File => app.open_file_picker(),
            },
            FormField::Style
            | FormField::Language
            | FormField::Voice
            | FormField::VisualStyle => cycle_focused(app, 1),
            FormField::Submit => {
                // Disabled while a generation request is pending
                if !app.is_generating {
                    app.submit_form();
                }
            }
        },

        _ => {}
    }
}

/// Left/right semantics for the focused form row: switch source tabs or
/// cycle the option value.
fn cycle_focused(app: &mut App, dir: i8) {
    match app.form_focus {
        FormField::Source => {
            let next = cycle(&InputSource::all(), app.form.source, dir);
            app.form.select_source(next);
        }
        FormField::Style => {
            app.form.options.style = cycle(&Style::all(), app.form.options.style, dir);
        }
        FormField::Language => {
            app.form.options.language = cycle(&Language::all(), app.form.options.language, dir);
        }
        FormField::Voice => {
            app.form.options.voice = cycle(&Voice::all(), app.form.options.voice, dir);
        }
        FormField::VisualStyle => {
            app.form.options.visual_style =
                cycle(&VisualStyle::all(), app.form.options.visual_style, dir);
        }
        FormField::Content | FormField::Submit => {}
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, dir: i8) -> T {
    let len = all.len() as i8;
    let i = all.iter().position(|v| *v == current).unwrap_or(0) as i8;
    all[(i + dir).rem_euclid(len) as usize]
}

fn handle_preview_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => app.preview_tab = app.preview_tab.prev(),
        KeyCode::Char('l') | KeyCode::Right => app.preview_tab = app.preview_tab.next(),
        KeyCode::Char('j') | KeyCode::Down => {
            app.preview_scroll = app.preview_scroll.saturating_add(1)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.preview_scroll = app.preview_scroll.saturating_sub(1)
        }
        KeyCode::Char('r') => app.refresh_preview(),
        _ => {}
    }
}

fn handle_projects_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Char('j') | KeyCode::Down => app.project_row_down(),
        KeyCode::Char('k') | KeyCode::Up => app.project_row_up(),
        KeyCode::Char('n') | KeyCode::Right => app.project_next_page(),
        KeyCode::Char('p') | KeyCode::Left => app.project_prev_page(),
        KeyCode::Enter => app.detail_project = app.selected_project().cloned(),
        KeyCode::Char('e') => app.edit_project(),
        KeyCode::Char('x') => app.export_project(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match app.page {
        Page::Create => handle_content_editing(app, key),
        Page::Projects => handle_search_editing(app, key),
        Page::Overview => app.input_mode = InputMode::Normal,
    }
}

fn handle_content_editing(app: &mut App, key: KeyEvent) {
    match app.form.source {
        InputSource::Text => match key.code {
            KeyCode::Esc => app.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                app.form.script_text.push('\n');
                app.form.text_changed();
            }
            KeyCode::Backspace => {
                app.form.script_text.pop();
                app.form.text_changed();
            }
            KeyCode::Char(c) => {
                app.form.script_text.push(c);
                app.form.text_changed();
            }
            _ => {}
        },
        InputSource::Url => match key.code {
            KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                app.form.script_url.pop();
                app.form.url_changed();
            }
            KeyCode::Char(c) => {
                app.form.script_url.push(c);
                app.form.url_changed();
            }
            _ => {}
        },
        // File content is chosen through the picker popup
        InputSource::File => app.input_mode = InputMode::Normal,
    }
}

fn handle_search_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Backspace => {
            app.project_search.pop();
            app.project_search_changed();
        }
        KeyCode::Char(c) => {
            app.project_search.push(c);
            app.project_search_changed();
        }
        _ => {}
    }
}

fn handle_file_picker(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_file_picker(),
        KeyCode::Enter => app.choose_file(),
        KeyCode::Backspace => {
            app.file_input.pop();
        }
        KeyCode::Char(c) => app.file_input.push(c),
        _ => {}
    }
}

fn handle_login(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('f') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.login.switch_tab(AuthTab::Forgot);
        return;
    }

    match key.code {
        KeyCode::Esc => {
            // Forgot-password is a detour off the login tab
            if app.login.tab == AuthTab::Forgot {
                app.login.switch_tab(AuthTab::Login);
            } else {
                app.close_login();
            }
        }
        KeyCode::Tab | KeyCode::Down => app.login.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.login.focus_prev(),
        KeyCode::Enter => app.submit_auth(),
        KeyCode::Left => {
            if app.login.tab == AuthTab::Register {
                app.login.switch_tab(AuthTab::Login);
            }
        }
        KeyCode::Right => {
            if app.login.tab == AuthTab::Login {
                app.login.switch_tab(AuthTab::Register);
            }
        }
        KeyCode::Backspace => {
            let field = app.login.focused_field();
            app.login.value_mut(field).pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            let field = app.login.focused_field();
            app.login.value_mut(field).push(c);
        }
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    // Popups and the account screen own the input while they are up.
    if app.show_login || app.show_file_picker || app.detail_project.is_some() {
        return;
    }
    let (x, y) = (mouse.column, mouse.row);

    let in_form = app.form_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_preview = app
        .preview_area
        .map(|r| point_in_rect(x, y, r))
        .unwrap_or(false);
    let in_table = app.table_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        // Clicking the sidebar switches pages; the account block at the
        // bottom opens the login screen.
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(sidebar) = app.sidebar_area {
                if point_in_rect(x, y, sidebar) {
                    if y >= sidebar.bottom().saturating_sub(4) {
                        app.open_login();
                    } else if y > sidebar.y {
                        let index = (y - sidebar.y - 1) as usize;
                        if let Some(page) = Page::all().get(index) {
                            app.select_page(*page);
                        }
                    }
                }
            }
        }
        MouseEventKind::ScrollDown => {
            if in_table {
                app.project_row_down();
            } else if in_preview {
                app.preview_scroll = app.preview_scroll.saturating_add(3);
            } else if in_form {
                app.form_focus = app.form_focus.next();
            }
        }
        MouseEventKind::ScrollUp => {
            if in_table {
                app.project_row_up();
            } else if in_preview {
                app.preview_scroll = app.preview_scroll.saturating_sub(3);
            } else if in_form {
                app.form_focus = app.form_focus.prev();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_typing_into_text_draft_validates_live() {
        let mut app = App::new(Config::new());
        app.form_focus = FormField::Content;
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.input_mode, InputMode::Editing);

        for c in "short".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert!(app.form.text_error.is_some());

        for c in "x".repeat(60).chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert!(app.form.text_error.is_none());
    }

    #[tokio::test]
    async fn test_source_row_cycles_without_clearing_drafts() {
        let mut app = App::new(Config::new());
        app.form.script_text = "draft".to_string();
        app.form_focus = FormField::Source;

        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.form.source, InputSource::Url);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.form.source, InputSource::File);
        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.form.source, InputSource::Text);
        assert_eq!(app.form.script_text, "draft");
    }

    #[tokio::test]
    async fn test_fetch_key_ignored_outside_url_source() {
        let mut app = App::new(Config::new());
        app.form.script_url = "https://example.com".to_string();
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert!(app.fetch_task.is_none());

        app.form.select_source(InputSource::Url);
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert!(app.fetch_task.is_some());

        // Second press while in flight must not replace the task.
        handle_key(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.form.fetch_status, crate::form::FetchStatus::Fetching);
        app.abort_tasks();
    }

    #[tokio::test]
    async fn test_login_tab_switch_and_typing() {
        let mut app = App::new(Config::new());
        app.open_login();

        handle_key(&mut app, key(KeyCode::Right));
        assert_eq!(app.login.tab, AuthTab::Register);

        for c in "Jane".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.login.register_name, "Jane");

        handle_key(&mut app, key(KeyCode::Left));
        assert_eq!(app.login.tab, AuthTab::Login);
        // Register draft survives the tab switch.
        assert_eq!(app.login.register_name, "Jane");
    }

    #[tokio::test]
    async fn test_search_typing_resets_page() {
        let mut app = App::new(Config::new());
        app.select_page(Page::Projects);
        app.project_page = 1;
        handle_key(&mut app, key(KeyCode::Char('/')));
        for c in "dna".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.project_search, "dna");
        assert_eq!(app.visible_projects().len(), 1);
    }
}
