//! # Studio Session
//!
//! The application shell: owns the one mutable [`CardConfig`], the active
//! [`Features`], layout constants and the typeface. Everything else is
//! derived on demand. The layout plan is recomputed on every export and
//! there is no hidden reactive state.
//!
//! ## Example
//!
//! ```no_run
//! use qrstudio::config::ConfigField;
//! use qrstudio::font::BitmapTypeface;
//! use qrstudio::studio::Studio;
//!
//! # async fn example() -> Result<(), qrstudio::StudioError> {
//! let mut studio = Studio::new(Box::new(BitmapTypeface::new()?));
//! studio.update(ConfigField::Content("https://example.com".into()))?;
//! studio.update(ConfigField::Title("Our Menu".into()))?;
//!
//! if let Some(export) = studio.export().await? {
//!     export.save(std::path::Path::new("."))?;
//! }
//! # Ok(())
//! # }
//! ```

use crate::StudioError;
use crate::config::{CardConfig, ConfigField, Features};
use crate::export::{self, Export};
use crate::font::Typeface;
use crate::layout::{LayoutConstants, LayoutPlan, Planner};
use crate::qr::QrSymbol;
use crate::suggest::SuggestionService;

/// Outcome of a title suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// The title was replaced.
    Applied(String),
    /// The service failed; the title is unchanged.
    Failed,
    /// Nothing was requested (no content, or suggestions disabled).
    Skipped,
}

/// One single-user studio session.
pub struct Studio {
    config: CardConfig,
    features: Features,
    constants: LayoutConstants,
    typeface: Box<dyn Typeface>,
}

impl Studio {
    pub fn new(typeface: Box<dyn Typeface>) -> Self {
        Self::with_config(CardConfig::default(), typeface)
    }

    pub fn with_config(config: CardConfig, typeface: Box<dyn Typeface>) -> Self {
        Self {
            config,
            features: Features::default(),
            constants: LayoutConstants::default(),
            typeface,
        }
    }

    pub fn features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn constants(mut self, constants: LayoutConstants) -> Self {
        self.constants = constants;
        self
    }

    pub fn config(&self) -> &CardConfig {
        &self.config
    }

    /// Whether export is currently possible.
    pub fn can_export(&self) -> bool {
        self.config.has_content()
    }

    /// Apply one configuration edit.
    pub fn update(&mut self, field: ConfigField) -> Result<(), StudioError> {
        self.config.apply(field)
    }

    /// Current layout plan.
    pub fn plan(&self) -> LayoutPlan {
        Planner::new(self.constants, self.features).plan(&self.config, self.typeface.as_ref())
    }

    /// SVG preview of the current symbol, or `None` without content.
    pub fn preview_svg(&self) -> Result<Option<String>, StudioError> {
        if !self.config.has_content() {
            return Ok(None);
        }
        let symbol = QrSymbol::encode(&self.config.content, self.config.ec_level)?;
        Ok(Some(symbol.to_svg(
            self.config.size,
            self.config.margin > 0,
            export::qr_colors(&self.config, self.features),
        )))
    }

    /// Render the card. `Ok(None)` when there is no content.
    pub async fn export(&self) -> Result<Option<Export>, StudioError> {
        export::export_card(
            &self.config,
            self.features,
            self.constants,
            self.typeface.as_ref(),
        )
        .await
    }

    /// Render the card, swallowing failures.
    ///
    /// Surface and decode failures abort the export without output; the
    /// cause is logged.
    pub async fn try_export(&self) -> Option<Export> {
        match self.export().await {
            Ok(export) => export,
            Err(e) => {
                tracing::warn!(error = %e, "export aborted");
                None
            }
        }
    }

    /// Ask `service` for a title based on the current content.
    ///
    /// On success the title is overwritten. On failure the error is logged
    /// and the previous title is kept. The session is borrowed mutably for
    /// the whole request, so edits cannot interleave with it.
    pub async fn suggest_title(&mut self, service: &dyn SuggestionService) -> SuggestOutcome {
        if !self.features.suggestions || !self.config.has_content() {
            return SuggestOutcome::Skipped;
        }

        match service.suggest(&self.config.content).await {
            Ok(title) => {
                tracing::info!(title = %title, "title suggested");
                self.config.title = title.clone();
                SuggestOutcome::Applied(title)
            }
            Err(e) => {
                tracing::warn!(error = %e, "title suggestion failed");
                SuggestOutcome::Failed
            }
        }
    }
}
