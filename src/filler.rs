//! The fill sequence: open a session, write each configured value in file
//! order, optionally submit, close. The loop runs against the [`FormSession`]
//! trait so tests drive a scripted fake instead of a live browser.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::input::{FieldEntry, FillPlan};

/// What to do when a configured field has no matching element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingFieldPolicy {
    /// Stop the run at the first missing field.
    #[default]
    Abort,
    /// Record the miss and continue with the remaining fields.
    Skip,
}

/// Run-mode toggles for one fill.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillOptions {
    /// Click the submit control once all fields are written.
    pub submit: bool,
    pub missing_field: MissingFieldPolicy,
    /// Re-read each field after writing and require the value to have stuck.
    pub verify: bool,
}

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct FillReport {
    /// Names of fields written, in fill order.
    pub filled: Vec<String>,
    /// Names of fields skipped under [`MissingFieldPolicy::Skip`].
    pub skipped: Vec<String>,
    pub submitted: bool,
}

/// One live page session the filler writes into.
#[async_trait]
pub trait FormSession: Send + Sync {
    /// Write the configured value into the field's element.
    async fn fill(&self, field: &FieldEntry) -> Result<()>;

    /// Read the field's current value. Used by verification.
    async fn value_of(&self, field: &FieldEntry) -> Result<String>;

    /// Click the control matching the selector.
    async fn click(&self, selector: &str) -> Result<()>;

    /// Release the session and the browser behind it.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens sessions against the portal. Injected into [`FormFiller::run`] so
/// tests can substitute a fake and count opens.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, url: &str) -> Result<Box<dyn FormSession>>;
}

/// The form filler: a parsed plan plus run-mode options.
pub struct FormFiller {
    plan: FillPlan,
    options: FillOptions,
}

impl FormFiller {
    pub fn new(plan: FillPlan, options: FillOptions) -> Self {
        Self { plan, options }
    }

    /// Run the fill end to end. The session is closed on every exit path,
    /// including a failed fill, so the browser never outlives the run.
    pub async fn run(&self, factory: &dyn SessionFactory) -> Result<FillReport> {
        info!(
            url = %self.plan.url,
            fields = self.plan.fields.len(),
            "opening portal session"
        );
        let session = factory.open(&self.plan.url).await?;
        let outcome = self.drive(session.as_ref()).await;
        let closed = session.close().await;
        let report = outcome?;
        closed?;
        Ok(report)
    }

    async fn drive(&self, session: &dyn FormSession) -> Result<FillReport> {
        let mut report = FillReport::default();

        for field in &self.plan.fields {
            match session.fill(field).await {
                Ok(()) => {
                    debug!(field = %field.name, "field written");
                    if self.options.verify {
                        let live = session.value_of(field).await?;
                        if live != field.value {
                            return Err(Error::ValueRejected {
                                field: field.name.clone(),
                                reason: format!("wrote {:?} but read back {live:?}", field.value),
                            });
                        }
                    }
                    report.filled.push(field.name.clone());
                }
                Err(Error::FieldNotFound(selector)) => match self.options.missing_field {
                    MissingFieldPolicy::Abort => return Err(Error::FieldNotFound(selector)),
                    MissingFieldPolicy::Skip => {
                        warn!(field = %field.name, %selector, "field not on page, skipping");
                        report.skipped.push(field.name.clone());
                    }
                },
                Err(other) => return Err(other),
            }
        }

        if self.options.submit {
            session
                .click(&self.plan.submit_selector)
                .await
                .map_err(|e| Error::SubmitError(e.to_string()))?;
            info!("form submitted");
            report.submitted = true;
        } else {
            info!("submit not requested, form left populated for review");
        }

        Ok(report)
    }
}
