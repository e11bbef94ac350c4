use crate::task::{Task, TaskDraft, ValidationError};

/// Single-line text input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TextField {
    value: String,
}

impl TextField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    #[default]
    Title,
    Description,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Title => Field::Description,
            Field::Description => Field::Title,
        }
    }
}

/// Title and description inputs shared by the new-task form and the inline
/// edit row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: TextField,
    pub description: TextField,
    pub focused: Field,
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_task(task: &Task) -> Self {
        Self {
            title: TextField::with_value(&task.title),
            description: TextField::with_value(&task.description),
            focused: Field::Title,
        }
    }

    pub fn focused_field_mut(&mut self) -> &mut TextField {
        match self.focused {
            Field::Title => &mut self.title,
            Field::Description => &mut self.description,
        }
    }

    pub fn draft(&self) -> TaskDraft {
        TaskDraft::new(self.title.value(), self.description.value())
    }

    /// Fields are left untouched on rejection so the user can fix them.
    pub fn submit(&self) -> Result<TaskDraft, ValidationError> {
        let draft = self.draft();
        draft.validate()?;
        Ok(draft)
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.focused = Field::Title;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(form: &mut TaskForm, text: &str) {
        for c in text.chars() {
            form.focused_field_mut().push(c);
        }
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = TaskForm::new();
        type_into(&mut form, "Title");
        form.focused = form.focused.next();
        type_into(&mut form, "Body");

        assert_eq!(form.title.value(), "Title");
        assert_eq!(form.description.value(), "Body");
    }

    #[test]
    fn test_backspace_removes_last_char() {
        let mut field = TextField::with_value("abc");
        field.backspace();
        assert_eq!(field.value(), "ab");
        field.clear();
        field.backspace();
        assert_eq!(field.value(), "");
    }

    #[test]
    fn test_submit_rejects_missing_description_and_keeps_input() {
        let mut form = TaskForm::new();
        type_into(&mut form, "Only a title");

        assert_eq!(form.submit(), Err(ValidationError::MissingFields));
        assert_eq!(form.title.value(), "Only a title");
    }

    #[test]
    fn test_submit_returns_draft() {
        let mut form = TaskForm::new();
        type_into(&mut form, "T");
        form.focused = Field::Description;
        type_into(&mut form, "D");

        assert_eq!(form.submit(), Ok(TaskDraft::new("T", "D")));
    }

    #[test]
    fn test_from_task_prefills_fields() {
        let task = Task {
            id: "1".to_string(),
            title: "a".to_string(),
            description: "b".to_string(),
        };
        let form = TaskForm::from_task(&task);
        assert_eq!(form.draft(), TaskDraft::new("a", "b"));
    }

    #[test]
    fn test_clear_resets_focus() {
        let mut form = TaskForm::new();
        form.focused = Field::Description;
        type_into(&mut form, "x");
        form.clear();
        assert_eq!(form, TaskForm::new());
    }
}
