//! Document session: which file is active, and its overlay.
//!
//! Selecting a new file replaces the overlay in one step and issues a new
//! [`DocumentToken`]. Analysis responses are delivered back together with
//! the token of the request that produced them; a response whose token is
//! no longer the active one is dropped without touching any state.

use std::fmt;

use crate::analysis::AnalysisResult;
use crate::error::{OverlayError, ReconcileWarning};
use crate::options::ReconcileOptions;
use crate::overlay::OverlayController;
use crate::reconcile::reconcile;

/// Identity of one file selection within a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentToken(u64);

impl fmt::Display for DocumentToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to an analysis response handed to [`Session::complete`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The response was reconciled and is now the active overlay.
    Loaded {
        field_count: usize,
        warnings: Vec<ReconcileWarning>,
    },
    /// The response belonged to a superseded file selection and was dropped.
    Stale,
}

#[derive(Debug, Clone)]
struct ActiveDocument {
    token: DocumentToken,
    file_name: String,
    loaded: bool,
}

/// Owns the single active document and its [`OverlayController`].
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: ReconcileOptions,
    issued: u64,
    active: Option<ActiveDocument>,
    controller: OverlayController,
}

impl Session {
    pub fn new(options: ReconcileOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &ReconcileOptions {
        &self.options
    }

    pub fn controller(&self) -> &OverlayController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut OverlayController {
        &mut self.controller
    }

    pub fn active_token(&self) -> Option<DocumentToken> {
        self.active.as_ref().map(|a| a.token)
    }

    pub fn active_file(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.file_name.as_str())
    }

    /// Whether the active document's analysis has been applied.
    pub fn is_loaded(&self) -> bool {
        self.active.as_ref().is_some_and(|a| a.loaded)
    }

    /// A new file was selected: discard the current fields and return the
    /// token its analysis response must be completed with.
    pub fn open_document(&mut self, file_name: impl Into<String>) -> DocumentToken {
        self.issued += 1;
        let token = DocumentToken(self.issued);
        let viewport = self.controller.viewport();
        self.controller = OverlayController::default().with_viewport(viewport);
        self.active = Some(ActiveDocument {
            token,
            file_name: file_name.into(),
            loaded: false,
        });
        #[cfg(feature = "tracing")]
        tracing::info!(%token, file = self.active_file().unwrap_or_default(), "document selected");
        token
    }

    /// Deliver the analysis response for the request started under `token`.
    ///
    /// Failed responses are returned as errors and leave the overlay as it
    /// was. Responses for anything but the active, not yet loaded document
    /// yield [`LoadOutcome::Stale`].
    pub fn complete<E>(
        &mut self,
        token: DocumentToken,
        response: Result<AnalysisResult, E>,
    ) -> Result<LoadOutcome, OverlayError>
    where
        E: Into<OverlayError>,
    {
        let is_current = self
            .active
            .as_ref()
            .is_some_and(|a| a.token == token && !a.loaded);
        if !is_current {
            #[cfg(feature = "tracing")]
            tracing::info!(%token, "discarding stale analysis response");
            return Ok(LoadOutcome::Stale);
        }

        let analysis = match response {
            Ok(analysis) => analysis,
            Err(e) => return Err(e.into()),
        };
        let result = reconcile(&analysis, &self.options);
        let warnings = result.warnings.clone();
        let fields = if self.options.strict {
            result.into_strict()?
        } else {
            result.value
        };

        let field_count = fields.len();
        let viewport = self.controller.viewport();
        self.controller =
            OverlayController::new(fields, analysis.page_count()).with_viewport(viewport);
        if let Some(active) = self.active.as_mut() {
            active.loaded = true;
        }
        #[cfg(feature = "tracing")]
        tracing::info!(%token, field_count, warnings = warnings.len(), "analysis applied");

        Ok(LoadOutcome::Loaded {
            field_count,
            warnings,
        })
    }
}
