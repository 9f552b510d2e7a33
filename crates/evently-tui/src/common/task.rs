use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Login,
    SignUp,
    Logout,
    EventList,
    EventLoad,
    EventCreate,
    CoverImageLoad,
    Redirect,
}

impl TaskKind {
    pub const ALL: [TaskKind; 8] = [
        TaskKind::Login,
        TaskKind::SignUp,
        TaskKind::Logout,
        TaskKind::EventList,
        TaskKind::EventLoad,
        TaskKind::EventCreate,
        TaskKind::CoverImageLoad,
        TaskKind::Redirect,
    ];

    /// Whether the runtime attaches a cancellation token.
    pub fn is_cancelable(self) -> bool {
        matches!(self, TaskKind::Redirect | TaskKind::CoverImageLoad)
    }
}

#[derive(Debug, Clone)]
pub struct TaskStarted {
    pub id: TaskId,
    pub cancel: Option<CancellationToken>,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by the reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
    pub cancel: Option<CancellationToken>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn on_started(&mut self, started: &TaskStarted) {
        self.active = Some(started.id);
        self.cancel.clone_from(&started.cancel);
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.clear();
        }
        ok
    }

    /// Forgets the task; a later completion is then dropped.
    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub login: TaskState,
    pub sign_up: TaskState,
    pub logout: TaskState,
    pub event_list: TaskState,
    pub event_load: TaskState,
    pub event_create: TaskState,
    pub cover_image_load: TaskState,
    pub redirect: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::Login => &self.login,
            TaskKind::SignUp => &self.sign_up,
            TaskKind::Logout => &self.logout,
            TaskKind::EventList => &self.event_list,
            TaskKind::EventLoad => &self.event_load,
            TaskKind::EventCreate => &self.event_create,
            TaskKind::CoverImageLoad => &self.cover_image_load,
            TaskKind::Redirect => &self.redirect,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::Login => &mut self.login,
            TaskKind::SignUp => &mut self.sign_up,
            TaskKind::Logout => &mut self.logout,
            TaskKind::EventList => &mut self.event_list,
            TaskKind::EventLoad => &mut self.event_load,
            TaskKind::EventCreate => &mut self.event_create,
            TaskKind::CoverImageLoad => &mut self.cover_image_load,
            TaskKind::Redirect => &mut self.redirect,
        }
    }

    pub fn is_any_running(&self) -> bool {
        self.login.is_running()
            || self.sign_up.is_running()
            || self.logout.is_running()
            || self.event_list.is_running()
            || self.event_load.is_running()
            || self.event_create.is_running()
            || self.cover_image_load.is_running()
            || self.redirect.is_running()
    }
}
