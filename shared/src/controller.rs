use std::cell::{Cell, Ref, RefCell};

use crate::client::AiClient;
use crate::image::SegmentedImage;
use crate::session::{RequestId, Session, WizardStep};

/// Drives a [`Session`] through the upload → identify → segment wizard.
///
/// The controller lives on a single-threaded executor. It never holds a
/// borrow of the Session across an await point, so the UI may read the
/// Session at any time between suspension points. The listener is invoked
/// after every visible state change.
pub struct WizardController<C: AiClient> {
    client: C,
    session: RefCell<Session<C::Image, C::Resource>>,
    next_request: Cell<u64>,
    listener: Option<Box<dyn Fn()>>,
}

impl<C: AiClient> WizardController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            session: RefCell::new(Session::new()),
            next_request: Cell::new(1),
            listener: None,
        }
    }

    pub fn with_listener(mut self, listener: impl Fn() + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn session(&self) -> Ref<'_, Session<C::Image, C::Resource>> {
        self.session.borrow()
    }

    pub fn step(&self) -> WizardStep {
        self.session.borrow().step()
    }

    pub fn select_image(&self, image: C::Image, preview: C::Resource) {
        self.session.borrow_mut().select_image(image, preview);
        self.notify();
    }

    pub async fn analyze(&self) {
        let request = self.next_request_id();
        let started = self.session.borrow_mut().begin_analysis(request);
        self.notify();

        let image = match started {
            Ok(image) => image,
            Err(err) => {
                log::warn!("Analysis requested without an image: {}", err);
                return;
            }
        };

        log::info!("Identifying objects (request {})", request.0);
        let result = self.client.identify_objects(&image).await;
        if let Err(err) = &result {
            log::warn!("Identification failed: {}", err);
        }

        if self.session.borrow_mut().complete_analysis(request, result) {
            self.notify();
        } else {
            log::debug!("Discarding superseded identification (request {})", request.0);
        }
    }

    pub async fn select_object(&self, label: impl Into<String>) {
        let label = label.into();
        let request = self.next_request_id();
        let Some(image) = self
            .session
            .borrow_mut()
            .begin_segmentation(request, label.clone())
        else {
            log::debug!("Ignoring object selection without an image");
            return;
        };
        self.notify();

        log::info!("Segmenting '{}' (request {})", label, request.0);
        let result = self.client.segment_object(&image, &label).await;
        if let Err(err) = &result {
            log::warn!("Segmentation of '{}' failed: {}", label, err);
        }

        if self.session.borrow_mut().complete_segmentation(request, result) {
            self.notify();
        } else {
            log::debug!("Discarding superseded segmentation of '{}' (request {})", label, request.0);
        }
    }

    /// Hands the current result and its download name to `save`.
    /// Returns `false` when there is nothing to save.
    pub fn save_result<F>(&self, save: F) -> bool
    where
        F: FnOnce(&str, &SegmentedImage<C::Resource>),
    {
        let session = self.session.borrow();
        match session.save_target() {
            Some(target) => {
                save(&target.filename, target.result);
                true
            }
            None => false,
        }
    }

    pub fn reset(&self) {
        self.session.borrow_mut().reset();
        self.notify();
    }

    fn next_request_id(&self) -> RequestId {
        let id = self.next_request.get();
        self.next_request.set(id + 1);
        RequestId(id)
    }

    fn notify(&self) {
        if let Some(listener) = &self.listener {
            listener();
        }
    }
}
