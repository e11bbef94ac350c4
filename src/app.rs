use crate::form::{Field, TaskForm};
use crate::store::{TaskError, TaskStore, WalletStatus};
use crate::task::Task;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form,
    List,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

/// Row being edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    pub id: String,
    pub form: TaskForm,
}

/// Shift is part of typing; any other modifier makes the key a shortcut.
fn is_plain(key: &KeyEvent) -> bool {
    key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

pub struct App {
    store: Box<dyn TaskStore>,
    pub tasks: Vec<Task>,
    pub selected: usize,
    pub focus: Focus,
    pub form: TaskForm,
    pub editing: Option<EditState>,
    pub status: Option<Status>,
}

impl App {
    pub fn new(store: Box<dyn TaskStore>) -> Self {
        let mut app = Self {
            store,
            tasks: Vec::new(),
            selected: 0,
            focus: Focus::Form,
            form: TaskForm::new(),
            editing: None,
            status: None,
        };
        app.refresh();
        if !app.form_available() {
            app.focus = Focus::List;
        }
        app
    }

    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }

    pub fn wallet_status(&self) -> WalletStatus {
        self.store.wallet_status()
    }

    /// The form is hidden while a required wallet is not connected.
    pub fn form_available(&self) -> bool {
        self.store.wallet_status() != WalletStatus::Disconnected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Quit;
        }
        if self.editing.is_some() {
            self.handle_edit_key(key);
            return Flow::Continue;
        }
        match self.focus {
            Focus::Form => {
                self.handle_form_key(key);
                Flow::Continue
            }
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if is_plain(&key) => self.form.focused_field_mut().push(c),
            KeyCode::Backspace => self.form.focused_field_mut().backspace(),
            KeyCode::Tab => match self.form.focused {
                Field::Title => self.form.focused = Field::Description,
                Field::Description => {
                    self.form.focused = Field::Title;
                    self.focus = Focus::List;
                }
            },
            KeyCode::Enter => self.submit_form(),
            KeyCode::Esc => self.focus = Focus::List,
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Flow {
        if !is_plain(&key) {
            return Flow::Continue;
        }
        match key.code {
            KeyCode::Char('q') => return Flow::Quit,
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('r') => self.refresh(),
            KeyCode::Char('w') => self.connect_wallet(),
            KeyCode::Char('n') | KeyCode::Tab => {
                if self.form_available() {
                    self.focus = Focus::Form;
                } else {
                    self.set_error(TaskError::WalletNotConnected);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let Some(edit) = self.editing.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Char(c) if is_plain(&key) => edit.form.focused_field_mut().push(c),
            KeyCode::Backspace => edit.form.focused_field_mut().backspace(),
            KeyCode::Tab => edit.form.focused = edit.form.focused.next(),
            KeyCode::Enter => self.save_edit(),
            KeyCode::Esc => self.cancel_edit(),
            _ => {}
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    pub fn refresh(&mut self) {
        self.tasks = self.store.list_tasks();
        self.clamp_selection();
        debug!(count = self.tasks.len(), "Fetched tasks");
    }

    pub fn submit_form(&mut self) {
        let draft = match self.form.submit() {
            Ok(draft) => draft,
            Err(err) => return self.set_error(err.into()),
        };
        match self.store.create_task(&draft) {
            Ok(id) => {
                info!(%id, "Task created");
                self.tasks.push(Task::from_draft(id, &draft));
                self.form.clear();
                self.set_info("Task created");
            }
            Err(err) => self.set_error(err),
        }
    }

    pub fn begin_edit(&mut self) {
        if let Some(task) = self.selected_task() {
            self.editing = Some(EditState {
                id: task.id.clone(),
                form: TaskForm::from_task(task),
            });
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn save_edit(&mut self) {
        let Some((id, submitted)) = self
            .editing
            .as_ref()
            .map(|edit| (edit.id.clone(), edit.form.submit()))
        else {
            return;
        };
        let draft = match submitted {
            Ok(draft) => draft,
            Err(err) => return self.set_error(err.into()),
        };
        match self.store.update_task(&id, &draft) {
            Ok(()) => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
                    task.apply(&draft);
                }
                self.editing = None;
                self.set_info("Task updated");
            }
            Err(err) => self.set_error(err),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        match self.store.delete_task(&id) {
            Ok(()) => {
                self.tasks.retain(|t| t.id != id);
                self.clamp_selection();
                self.set_info("Task deleted");
            }
            Err(err) => self.set_error(err),
        }
    }

    pub fn connect_wallet(&mut self) {
        if self.store.wallet_status() == WalletStatus::NotRequired {
            return;
        }
        match self.store.connect_wallet() {
            Ok(address) => {
                self.set_info(format!("Wallet connected: {address}"));
                self.refresh();
            }
            Err(err) => self.set_error(err),
        }
    }

    fn set_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status::Info(message.into()));
    }

    fn set_error(&mut self, err: TaskError) {
        self.status = Some(Status::Error(err.to_string()));
    }
}
