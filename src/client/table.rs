//! Editable user table state machine shared by the admin views
//!
//! A table is `Idle` until its first load. Loads move it through `Loading`
//! and back to `Idle`, or into `Error` with the previous rows retained. A
//! row can be put into `Editing`; a successful mutation refetches the list,
//! while a failed one raises the banner and leaves rows and state alone.

use super::api::AdminApi;
use super::errors::ClientError;
use crate::core::models::User;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

/// Table columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Email,
    Roles,
    Permissions,
    Actions,
}

impl Column {
    pub fn header(self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Email => "Email",
            Column::Roles => "Roles",
            Column::Permissions => "Permissions",
            Column::Actions => "Actions",
        }
    }

    /// Display text of this column for `user`
    pub fn cell(self, user: &User) -> String {
        match self {
            Column::Name => user.name.clone(),
            Column::Email => user.email.clone(),
            Column::Roles => user.roles.joined(", "),
            Column::Permissions => user.permissions.clone(),
            Column::Actions => String::new(),
        }
    }
}

/// What a concrete view shows and how it writes an edit back
#[async_trait]
pub trait TableView: Send + Sync {
    /// One edit made in the row editor
    type Input: Send + Sync;

    fn title(&self) -> &'static str;

    fn columns(&self) -> &'static [Column];

    /// Values offered by the row editor
    fn options(&self) -> &'static [&'static str];

    async fn mutate(
        &self,
        api: &dyn AdminApi,
        user: &User,
        input: &Self::Input,
    ) -> Result<User, ClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableState {
    Idle,
    Loading,
    Error(String),
    Editing(Uuid),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("A request is already in flight")]
    Busy,

    #[error("No row for user {0}")]
    UnknownRow(Uuid),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Rows, state and banner of one view
#[derive(Debug)]
pub struct DataTable<V: TableView> {
    view: V,
    rows: Vec<User>,
    state: TableState,
    banner: Option<String>,
}

impl<V: TableView> DataTable<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            rows: Vec::new(),
            state: TableState::Idle,
            banner: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn rows(&self) -> &[User] {
        &self.rows
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state == TableState::Loading
    }

    /// Rendered cells, one `Vec` per row in column order
    pub fn cells(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|user| {
                self.view
                    .columns()
                    .iter()
                    .map(|column| column.cell(user))
                    .collect()
            })
            .collect()
    }

    /// Fetch the user list
    pub async fn load(&mut self, api: &dyn AdminApi) -> Result<(), TableError> {
        self.begin_load()?;
        let result = api.list_users().await;
        self.finish_load(result);
        Ok(())
    }

    pub fn begin_load(&mut self) -> Result<(), TableError> {
        if self.is_loading() {
            return Err(TableError::Busy);
        }
        self.state = TableState::Loading;
        Ok(())
    }

    /// Apply a fetch outcome; failure keeps the previous rows
    pub fn finish_load(&mut self, result: Result<Vec<User>, ClientError>) {
        match result {
            Ok(rows) => {
                debug!("{}: loaded {} rows", self.view.title(), rows.len());
                self.rows = rows;
                self.state = TableState::Idle;
                self.banner = None;
            }
            Err(e) => {
                warn!("{}: load failed: {}", self.view.title(), e);
                let message = e.banner_message();
                self.state = TableState::Error(message.clone());
                self.banner = Some(message);
            }
        }
    }

    /// Open the editor on a row, or close it when that row is already open
    pub fn toggle_edit(&mut self, user_id: Uuid) -> Result<(), TableError> {
        if self.is_loading() {
            return Err(TableError::Busy);
        }
        if self.state == TableState::Editing(user_id) {
            self.state = TableState::Idle;
            return Ok(());
        }
        self.row(user_id)?;
        self.state = TableState::Editing(user_id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.state, TableState::Editing(_)) {
            self.state = TableState::Idle;
        }
    }

    /// Send an edit for `user_id` and refetch on success
    pub async fn submit(
        &mut self,
        api: &dyn AdminApi,
        user_id: Uuid,
        input: &V::Input,
    ) -> Result<(), TableError> {
        if self.is_loading() {
            return Err(TableError::Busy);
        }
        let user = self.row(user_id)?.clone();

        match self.view.mutate(api, &user, input).await {
            Ok(_) => self.refetch(api).await,
            Err(e) => Err(self.mutation_failed(e)),
        }
    }

    /// Delete a user and refetch on success
    pub async fn delete(&mut self, api: &dyn AdminApi, user_id: Uuid) -> Result<(), TableError> {
        if self.is_loading() {
            return Err(TableError::Busy);
        }
        self.row(user_id)?;

        match api.delete_user(&user_id.to_string()).await {
            Ok(()) => self.refetch(api).await,
            Err(e) => Err(self.mutation_failed(e)),
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
        if matches!(self.state, TableState::Error(_)) {
            self.state = TableState::Idle;
        }
    }

    fn row(&self, user_id: Uuid) -> Result<&User, TableError> {
        self.rows
            .iter()
            .find(|user| user.id == user_id)
            .ok_or(TableError::UnknownRow(user_id))
    }

    async fn refetch(&mut self, api: &dyn AdminApi) -> Result<(), TableError> {
        self.state = TableState::Loading;
        let result = api.list_users().await;
        self.finish_load(result);
        Ok(())
    }

    fn mutation_failed(&mut self, error: ClientError) -> TableError {
        warn!("{}: mutation failed: {}", self.view.title(), error);
        self.banner = Some(error.banner_message());
        error.into()
    }
}
