//! ---
//! si_section: "07-test-support"
//! si_subsection: "module"
//! si_type: "source"
//! si_scope: "code"
//! si_description: "In-memory stub backend with fault injection and a request log."
//! si_version: "v0.1.0"
//! si_owner: "tbd"
//! ---
//! Serves the same REST surface as the StudentInfo backend from memory so the
//! gateway, controller and binaries can be exercised without a database.
//!
//! ```no_run
//! # async fn demo() -> anyhow::Result<()> {
//! use si_testharness::StubBackend;
//!
//! let backend = StubBackend::new();
//! backend.insert_student("A", "F");
//! let handle = backend.spawn().await?;
//! println!("stub backend at {}", handle.base_url());
//! handle.shutdown().await?;
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use parking_lot::Mutex;
use si_model::{Contact, ContactId, Operation, Student, StudentId};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

mod routes;
mod store;

use store::Records;

/// Failure injected into one backend operation until cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Answer with this HTTP status and a plain-text body.
    Status(u16),
    /// Answer 2xx but report failure the way the real backend does for the
    /// operation (`success:false` envelope, `error` literal or `null`).
    Reject(String),
    /// Answer 2xx with a body that is not valid JSON.
    Malformed,
}

/// One request observed by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Backend operation the route maps to.
    pub operation: Operation,
    /// HTTP method.
    pub method: &'static str,
    /// Path relative to the deployment prefix.
    pub path: String,
}

#[derive(Default)]
pub(crate) struct StubState {
    pub(crate) records: Mutex<Records>,
    faults: Mutex<HashMap<Operation, Fault>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubState {
    /// Log the request and return the fault to answer with, if any.
    pub(crate) fn record(
        &self,
        operation: Operation,
        method: &'static str,
        path: String,
    ) -> Option<Fault> {
        self.requests.lock().push(RecordedRequest {
            operation,
            method,
            path,
        });
        self.faults.lock().get(&operation).cloned()
    }
}

/// In-memory backend; clones share the same records.
#[derive(Clone, Default)]
pub struct StubBackend {
    state: Arc<StubState>,
    prefix: Option<String>,
}

impl StubBackend {
    /// Empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount every route under `prefix`, e.g. `/StudentInfo`.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let trimmed = prefix.trim_end_matches('/');
        self.prefix = (!trimmed.is_empty()).then(|| {
            if trimmed.starts_with('/') {
                trimmed.to_owned()
            } else {
                format!("/{trimmed}")
            }
        });
        self
    }

    /// Insert a student as-is. A non-positive id is replaced with the next free one.
    pub fn seed_student(&self, student: Student) -> Student {
        self.state.records.lock().seed_student(student)
    }

    /// Insert a student with only the required fields.
    pub fn insert_student(&self, name: &str, father_name: &str) -> Student {
        self.seed_student(Student::new(0, name, father_name))
    }

    /// Insert a contact as-is. A non-positive id is replaced with the next free one.
    pub fn seed_contact(&self, contact: Contact) -> Contact {
        self.state.records.lock().seed_contact(contact)
    }

    /// Insert a contact for `student`.
    pub fn insert_contact(&self, student: StudentId, mob_no: &str, city: &str, address: &str) -> Contact {
        self.seed_contact(Contact {
            id: ContactId(0),
            student_id: student,
            mob_no: mob_no.to_owned(),
            city: city.to_owned(),
            address: address.to_owned(),
        })
    }

    /// Students in listing order (newest first).
    pub fn students(&self) -> Vec<Student> {
        self.state.records.lock().students()
    }

    /// Every stored contact in id order.
    pub fn contacts(&self) -> Vec<Contact> {
        self.state.records.lock().all_contacts()
    }

    /// Bytes of a stored upload.
    pub fn upload(&self, name: &str) -> Option<Vec<u8>> {
        self.state.records.lock().upload(name)
    }

    /// Make `operation` fail with `fault` until [`StubBackend::clear_faults`].
    pub fn inject_fault(&self, operation: Operation, fault: Fault) {
        self.state.faults.lock().insert(operation, fault);
    }

    /// Remove every injected fault.
    pub fn clear_faults(&self) {
        self.state.faults.lock().clear();
    }

    /// Requests observed so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// Number of requests observed for `operation`.
    pub fn request_count(&self, operation: Operation) -> usize {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|request| request.operation == operation)
            .count()
    }

    /// Total number of requests observed.
    pub fn total_requests(&self) -> usize {
        self.state.requests.lock().len()
    }

    fn router(&self) -> Router {
        let routes = routes::router(self.state.clone());
        let router = match &self.prefix {
            Some(prefix) => Router::new().nest(prefix, routes),
            None => routes,
        };
        router.layer(TraceLayer::new_for_http())
    }

    /// Serve on an ephemeral loopback port.
    pub async fn spawn(self) -> anyhow::Result<StubBackendHandle> {
        self.spawn_on(SocketAddr::from(([127, 0, 0, 1], 0))).await
    }

    /// Serve on `listen` and return a handle for shutdown.
    pub async fn spawn_on(self, listen: SocketAddr) -> anyhow::Result<StubBackendHandle> {
        let listener = TcpListener::bind(listen).await?;
        let address = listener.local_addr()?;
        let base_url = format!(
            "http://{}{}",
            address,
            self.prefix.as_deref().unwrap_or_default()
        );
        info!(address = %address, base_url = %base_url, "stub backend listening");

        let router = self.router();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let server = axum::serve(listener, router).with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        });
        let task = tokio::spawn(async move {
            if let Err(err) = server.await {
                warn!(error = %err, "stub backend exited with error");
            }
        });

        Ok(StubBackendHandle {
            address,
            base_url,
            backend: self,
            task,
            shutdown: shutdown_tx,
        })
    }
}

/// Running stub backend.
pub struct StubBackendHandle {
    address: SocketAddr,
    base_url: String,
    backend: StubBackend,
    task: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl StubBackendHandle {
    /// Socket the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.address
    }

    /// Base URL including the deployment prefix, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Records and fault controls of the running server.
    pub fn backend(&self) -> &StubBackend {
        &self.backend
    }

    /// Request graceful shutdown and wait for the server task to finish.
    pub async fn shutdown(self) -> anyhow::Result<()> {
        let _ = self.shutdown.send(true);
        match self.task.await {
            Ok(()) => Ok(()),
            Err(join) => Err(anyhow::anyhow!(join)),
        }
    }
}
