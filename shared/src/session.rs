use strum_macros::{Display, EnumIter};

use crate::error::{ClientError, WizardError};
use crate::image::{SegmentedImage, result_filename};

/// Wizard phase, always derived from the Session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
pub enum WizardStep {
    #[strum(to_string = "Carregar Imagem")]
    AwaitingUpload = 1,
    #[strum(to_string = "Selecionar Objeto")]
    ObjectsIdentified = 2,
    #[strum(to_string = "Resultado")]
    ResultReady = 3,
}

impl WizardStep {
    pub fn number(self) -> u8 {
        self as u8
    }

    /// All steps in wizard order.
    pub fn all() -> impl Iterator<Item = WizardStep> {
        <Self as strum::IntoEnumIterator>::iter()
    }
}

/// Identity of one outstanding remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// The chosen image together with the preview resource rendered for it.
#[derive(Debug, PartialEq)]
pub struct SourceImage<I, R> {
    pub image: I,
    pub preview: R,
}

/// Where and under which name a segmented result should be saved.
#[derive(Debug)]
pub struct SaveTarget<'a, R> {
    pub filename: String,
    pub result: &'a SegmentedImage<R>,
}

/// Working state of one image-analysis interaction.
///
/// `I` is the handle of the uploaded image and `R` a locally addressable
/// image resource. The Session owns at most one preview and one result
/// resource; replacing or clearing either drops the previous one.
#[derive(Debug, PartialEq)]
pub struct Session<I, R> {
    source: Option<SourceImage<I, R>>,
    identified_objects: Vec<String>,
    selected_label: Option<String>,
    segmented: Option<SegmentedImage<R>>,
    error: Option<WizardError>,
    pending_analysis: Option<RequestId>,
    pending_segmentation: Option<RequestId>,
}

impl<I, R> Default for Session<I, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I, R> Session<I, R> {
    pub fn new() -> Self {
        Self {
            source: None,
            identified_objects: Vec::new(),
            selected_label: None,
            segmented: None,
            error: None,
            pending_analysis: None,
            pending_segmentation: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        if self.segmented.is_some() {
            WizardStep::ResultReady
        } else if !self.identified_objects.is_empty() {
            WizardStep::ObjectsIdentified
        } else {
            WizardStep::AwaitingUpload
        }
    }

    pub fn source(&self) -> Option<&SourceImage<I, R>> {
        self.source.as_ref()
    }

    pub fn identified_objects(&self) -> &[String] {
        &self.identified_objects
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selected_label.as_deref()
    }

    pub fn segmented(&self) -> Option<&SegmentedImage<R>> {
        self.segmented.as_ref()
    }

    pub fn error(&self) -> Option<&WizardError> {
        self.error.as_ref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.pending_analysis.is_some()
    }

    pub fn is_segmenting(&self) -> bool {
        self.pending_segmentation.is_some()
    }

    /// Replaces the source image. Everything downstream of it is cleared and
    /// outstanding requests for the old image are superseded.
    pub fn select_image(&mut self, image: I, preview: R) {
        drop(self.source.take());
        self.clear_analysis();
        self.pending_analysis = None;
        self.pending_segmentation = None;
        self.source = Some(SourceImage { image, preview });
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Starts an analysis round for `request`, handing back the image to send.
    pub fn begin_analysis(&mut self, request: RequestId) -> Result<I, WizardError>
    where
        I: Clone,
    {
        let Some(image) = self.source.as_ref().map(|source| source.image.clone()) else {
            self.error = Some(WizardError::NoSourceImage);
            return Err(WizardError::NoSourceImage);
        };

        self.clear_analysis();
        self.pending_segmentation = None;
        self.pending_analysis = Some(request);
        Ok(image)
    }

    /// Applies the identify result. Returns `false` if `request` was
    /// superseded, in which case the Session is left untouched.
    pub fn complete_analysis(
        &mut self,
        request: RequestId,
        result: Result<Vec<String>, ClientError>,
    ) -> bool {
        if self.pending_analysis != Some(request) {
            return false;
        }
        self.pending_analysis = None;

        match result {
            Ok(objects) => {
                if objects.is_empty() {
                    self.error = Some(WizardError::EmptyIdentification);
                }
                self.identified_objects = objects;
            }
            Err(err) => {
                self.error = Some(WizardError::Identification(err.to_string()));
            }
        }
        true
    }

    /// Starts segmenting `label`. Returns `None` when there is no source image.
    pub fn begin_segmentation(&mut self, request: RequestId, label: String) -> Option<I>
    where
        I: Clone,
    {
        let image = self.source.as_ref()?.image.clone();

        self.selected_label = Some(label);
        drop(self.segmented.take());
        self.error = None;
        self.pending_segmentation = Some(request);
        Some(image)
    }

    /// Applies the segment result. Returns `false` if `request` was
    /// superseded; a discarded result is dropped here.
    pub fn complete_segmentation(
        &mut self,
        request: RequestId,
        result: Result<SegmentedImage<R>, ClientError>,
    ) -> bool {
        if self.pending_segmentation != Some(request) {
            return false;
        }
        self.pending_segmentation = None;

        match result {
            Ok(segmented) => self.segmented = Some(segmented),
            Err(err) => self.error = Some(WizardError::Segmentation(err.to_string())),
        }
        true
    }

    pub fn save_target(&self) -> Option<SaveTarget<'_, R>> {
        let result = self.segmented.as_ref()?;
        let label = self.selected_label.as_deref()?;
        Some(SaveTarget {
            filename: result_filename(label, &result.mime_type),
            result,
        })
    }

    fn clear_analysis(&mut self) {
        self.identified_objects.clear();
        self.selected_label = None;
        drop(self.segmented.take());
        self.error = None;
    }
}
