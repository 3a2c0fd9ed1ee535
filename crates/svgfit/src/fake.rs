//! An instrumented engine for exercising the pipeline without resvg.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tiny_skia as sk;

use crate::{ConfigError, Engine, IntrinsicSize, ParseError, RenderOptions};

/// Records every call and panics on use of a released document.
pub struct FakeEngine {
    pub size: IntrinsicSize,
    /// The status code `parse` reports.
    pub status: i32,
    pub fail_options: bool,
    pub build_delay: Duration,
    pub builds: AtomicUsize,
    next_id: AtomicUsize,
    live: Mutex<HashSet<usize>>,
    pub released: Mutex<Vec<usize>>,
    pub renders: Mutex<Vec<Render>>,
}

/// A recorded call to `render`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Render {
    pub document: usize,
    pub transform: sk::Transform,
    pub width: u32,
    pub height: u32,
    /// The first pixel of the canvas before drawing.
    pub first_pixel: [u8; 4],
}

#[derive(Debug)]
pub struct FakeOptions;

#[derive(Debug)]
pub struct FakeDocument(usize);

impl FakeEngine {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: IntrinsicSize::new(width, height),
            status: ParseError::OK,
            fail_options: false,
            build_delay: Duration::ZERO,
            builds: AtomicUsize::new(0),
            next_id: AtomicUsize::new(0),
            live: Mutex::new(HashSet::new()),
            released: Mutex::new(vec![]),
            renders: Mutex::new(vec![]),
        }
    }

    /// How many documents were parsed.
    pub fn parsed(&self) -> usize {
        self.next_id.load(Ordering::SeqCst)
    }

    /// How many documents are parsed but not yet released.
    pub fn live(&self) -> usize {
        self.live.lock().len()
    }

    fn check(&self, document: &FakeDocument) {
        assert!(
            self.live.lock().contains(&document.0),
            "document {} used after release",
            document.0
        );
    }
}

impl Engine for FakeEngine {
    type Options = FakeOptions;
    type Document = FakeDocument;

    fn create_options(&self, _: &RenderOptions) -> Result<FakeOptions, ConfigError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        thread::sleep(self.build_delay);
        if self.fail_options {
            return Err(ConfigError::Other("options allocation failed".into()));
        }
        Ok(FakeOptions)
    }

    fn parse(&self, _: &[u8], _: &FakeOptions) -> Result<FakeDocument, ParseError> {
        ParseError::from_status(self.status)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.live.lock().insert(id);
        Ok(FakeDocument(id))
    }

    fn size(&self, document: &FakeDocument) -> IntrinsicSize {
        self.check(document);
        self.size
    }

    fn render(
        &self,
        document: &FakeDocument,
        transform: sk::Transform,
        canvas: &mut sk::PixmapMut,
    ) {
        self.check(document);
        let (width, height) = (canvas.width(), canvas.height());
        let data = canvas.data_mut();
        let first_pixel = [data[0], data[1], data[2], data[3]];
        self.renders.lock().push(Render {
            document: document.0,
            transform,
            width,
            height,
            first_pixel,
        });
    }

    fn destroy(&self, document: FakeDocument) {
        assert!(
            self.live.lock().remove(&document.0),
            "document {} released twice",
            document.0
        );
        self.released.lock().push(document.0);
    }
}
