use crate::store::{TaskError, TaskStore};
use crate::task::{Task, TaskDraft};
use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// In-memory backend. Optionally snapshots to a JSON file and sleeps before
/// each call to imitate a network round trip.
#[derive(Debug, Default)]
pub struct MockStore {
    tasks: Vec<Task>,
    latency: Duration,
    data_file: Option<PathBuf>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_tasks() -> Self {
        let mut store = Self::new();
        store.tasks = sample_tasks();
        store
    }

    /// Loads the snapshot at `path`, or starts from the sample tasks when the
    /// file does not exist yet. `persist` writes back to the same file.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut store = if path.exists() {
            Self {
                tasks: load_from_file(&path),
                ..Self::default()
            }
        } else {
            Self::with_sample_tasks()
        };
        store.data_file = Some(path);
        store
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }
    }
}

fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Sample Task 1".to_string(),
            description: "This is a sample description".to_string(),
        },
        Task {
            id: Uuid::new_v4().to_string(),
            title: "Sample Task 2".to_string(),
            description: "Another sample description".to_string(),
        },
    ]
}

fn load_from_file(path: &Path) -> Vec<Task> {
    match fs::read_to_string(path) {
        Ok(data) => serde_json::from_str(&data).unwrap_or_else(|err| {
            warn!(path = %path.display(), %err, "Corrupt task snapshot, starting empty");
            Vec::new()
        }),
        Err(err) => {
            warn!(path = %path.display(), %err, "Failed to read task snapshot");
            Vec::new()
        }
    }
}

impl TaskStore for MockStore {
    fn list_tasks(&self) -> Vec<Task> {
        self.simulate_latency();
        self.tasks.clone()
    }

    fn create_task(&mut self, draft: &TaskDraft) -> Result<String, TaskError> {
        draft.validate()?;
        self.simulate_latency();
        let id = Uuid::new_v4().to_string();
        self.tasks.push(Task::from_draft(id.clone(), draft));
        debug!(%id, "Task created");
        Ok(id)
    }

    fn update_task(&mut self, id: &str, draft: &TaskDraft) -> Result<(), TaskError> {
        draft.validate()?;
        self.simulate_latency();
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => task.apply(draft),
            None => debug!(%id, "Update of unknown task ignored"),
        }
        Ok(())
    }

    fn delete_task(&mut self, id: &str) -> Result<(), TaskError> {
        self.simulate_latency();
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(%id, "Delete of unknown task ignored");
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), TaskError> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        let data = serde_json::to_string_pretty(&self.tasks)
            .map_err(|err| TaskError::Persist(err.to_string()))?;
        fs::write(path, data).map_err(|err| TaskError::Persist(err.to_string()))?;
        info!(path = %path.display(), count = self.tasks.len(), "Tasks saved");
        Ok(())
    }
}
