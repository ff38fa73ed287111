use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use st_node::{MapNode, NodeOptions};
use st_reflect::mapper::Configurable;
use st_reflect::registry::SerializerRegistry;

use crate::{Document, DocumentError};

// -----------------------------------------------------------------------------
// LoadFlags

/// How [`FileDocument::load`] treats the resident root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadFlags {
    /// Keep the resident root aside and restore it if reading fails.
    pub backup_on_failure: bool,
    /// Attach comment lines of the file to the nodes they precede.
    pub preserve_comments: bool,
}

impl LoadFlags {
    /// No backup, comments discarded.
    #[inline]
    pub const fn new() -> Self {
        Self {
            backup_on_failure: false,
            preserve_comments: false,
        }
    }

    #[inline]
    pub const fn backup(mut self, backup: bool) -> Self {
        self.backup_on_failure = backup;
        self
    }

    #[inline]
    pub const fn comments(mut self, preserve: bool) -> Self {
        self.preserve_comments = preserve;
        self
    }
}

// -----------------------------------------------------------------------------
// LoadOutcome / LoadState

/// The result of a successful [`FileDocument::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The file was read into the root.
    Loaded,
    /// Reading failed in backup mode and the previous root was restored.
    /// The failure is kept in [`FileDocument::state`].
    Recovered,
}

/// What the last [`FileDocument::load`] did.
#[derive(Debug, Default)]
#[non_exhaustive]
pub enum LoadState {
    #[default]
    Unloaded,
    Loaded,
    /// The last load failed in backup mode; the root is the one from before.
    Recovered(DocumentError),
    /// The last load failed without backup; the root is partially read.
    Failed,
}

impl LoadState {
    #[inline]
    pub fn is_recovered(&self) -> bool {
        matches!(self, Self::Recovered(_))
    }

    /// The failure swallowed by a backup-mode load.
    pub fn recovered_error(&self) -> Option<&DocumentError> {
        match self {
            Self::Recovered(error) => Some(error),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// FileDocument

/// A [`Document`] bound to a UTF-8 file.
///
/// The root stays resident between calls: [`load`](Self::load) reads the
/// file into it and [`save`](Self::save) writes it back. Headers set on the
/// document are written by `save` and replaced by the headers of the file on
/// a successful `load`.
///
/// A `FileDocument` does no locking; concurrent loads and saves of one file
/// must be serialized by the caller.
///
/// ```no_run
/// use st_document::{FileDocument, LoadFlags, LoadOutcome};
///
/// let mut document = FileDocument::new("app.conf");
/// document.root_mut().add("workers", "4").unwrap();
/// document.save().unwrap();
///
/// let outcome = document.load(LoadFlags::new().backup(true)).unwrap();
/// assert_eq!(outcome, LoadOutcome::Loaded);
/// ```
#[derive(Debug)]
pub struct FileDocument {
    path: PathBuf,
    document: Document,
    state: LoadState,
}

impl FileDocument {
    /// An empty document for the file at `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::from_document(path, Document::new())
    }

    pub fn from_document(path: impl Into<PathBuf>, document: Document) -> Self {
        Self {
            path: path.into(),
            document,
            state: LoadState::Unloaded,
        }
    }

    pub fn builder(path: impl Into<PathBuf>) -> FileDocumentBuilder {
        FileDocumentBuilder::new(path)
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[inline]
    pub fn options(&self) -> &Arc<NodeOptions> {
        self.document.options()
    }

    #[inline]
    pub fn root(&self) -> &MapNode {
        self.document.root()
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut MapNode {
        self.document.root_mut()
    }

    #[inline]
    pub fn headers(&self) -> &[String] {
        self.document.headers()
    }

    pub fn set_headers(&mut self, headers: impl IntoIterator<Item = impl Into<String>>) {
        self.document.set_headers(headers);
    }

    pub fn add_header(&mut self, header: impl Into<String>) {
        self.document.add_header(header);
    }

    #[inline]
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Reads the file into the resident root.
    ///
    /// Without backup, the root is cleared and read into; on failure the
    /// error is returned and the root keeps whatever was read before the
    /// failing line.
    ///
    /// With backup, the root is set aside and the file is read into a fresh
    /// map. On failure the previous root is put back, the error is kept in
    /// [`state`](Self::state) and `Ok(LoadOutcome::Recovered)` is returned.
    pub fn load(&mut self, flags: LoadFlags) -> Result<LoadOutcome, DocumentError> {
        let debug = self.options().debug();
        if debug {
            log::debug!(
                "loading {} (backup: {}, comments: {})",
                self.path.display(),
                flags.backup_on_failure,
                flags.preserve_comments,
            );
        }

        if !flags.backup_on_failure {
            return match self.read_file(flags.preserve_comments) {
                Ok(()) => {
                    self.state = LoadState::Loaded;
                    Ok(LoadOutcome::Loaded)
                }
                Err(error) => {
                    self.state = LoadState::Failed;
                    Err(error)
                }
            };
        }

        let aside = self.document.take_root();
        let headers = self.document.headers().to_vec();
        match self.read_file(flags.preserve_comments) {
            Ok(()) => {
                self.state = LoadState::Loaded;
                Ok(LoadOutcome::Loaded)
            }
            Err(error) => {
                self.document.replace_root(aside);
                self.document.set_headers(headers);
                log::warn!(
                    "failed to load {}, previous content restored: {error}",
                    self.path.display()
                );
                self.state = LoadState::Recovered(error);
                Ok(LoadOutcome::Recovered)
            }
        }
    }

    fn read_file(&mut self, preserve_comments: bool) -> Result<(), DocumentError> {
        let text = fs::read_to_string(&self.path).map_err(|e| DocumentError::io(&self.path, e))?;
        self.document.read(&text, preserve_comments)?;
        if self.options().debug() {
            log::debug!(
                "loaded {}: {} entries, {} headers",
                self.path.display(),
                self.root().len(),
                self.headers().len(),
            );
        }
        Ok(())
    }

    /// Writes headers and root to the file, creating missing parent
    /// directories.
    pub fn save(&self) -> Result<(), DocumentError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| DocumentError::io(parent, e))?;
        }
        let text = self.document.to_string();
        fs::write(&self.path, text).map_err(|e| DocumentError::io(&self.path, e))?;
        if self.options().debug() {
            log::debug!("saved {}: {} entries", self.path.display(), self.root().len());
        }
        Ok(())
    }

    /// Loads the file, then assigns the fields of `target` from the root.
    ///
    /// After a recovered load `target` is assigned from the restored root.
    pub fn load_into(
        &mut self,
        target: &mut dyn Configurable,
        flags: LoadFlags,
    ) -> Result<LoadOutcome, DocumentError> {
        let outcome = self.load(flags)?;
        self.document.modify(target)?;
        Ok(outcome)
    }

    /// Replaces the root with the fields of `source` and saves.
    pub fn save_from(&mut self, source: &dyn Configurable) -> Result<(), DocumentError> {
        self.document.extract(source)?;
        self.save()
    }
}

// -----------------------------------------------------------------------------
// FileDocumentBuilder

/// Options of a [`FileDocument`] fixed before its first use.
///
/// [`build`](Self::build) seals the indent width.
///
/// ```
/// use st_document::FileDocument;
///
/// let document = FileDocument::builder("app.conf")
///     .indent(4)
///     .header("managed file")
///     .translator(|text| format!("[en] {text}"))
///     .build()
///     .unwrap();
///
/// assert_eq!(document.options().indent(), 4);
/// assert!(document.options().set_indent(2).is_err());
/// assert_eq!(document.options().translate("hi"), "[en] hi");
/// ```
pub struct FileDocumentBuilder {
    path: PathBuf,
    headers: Vec<String>,
    indent: usize,
    debug: bool,
    translator: Option<st_node::Translator>,
    registry: Option<Arc<SerializerRegistry>>,
}

impl FileDocumentBuilder {
    fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            headers: Vec::new(),
            indent: NodeOptions::DEFAULT_INDENT,
            debug: false,
            translator: None,
            registry: None,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    /// Spaces per nesting level, two by default.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Logs load and save progress at debug level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Rewrites field comments when objects are extracted.
    pub fn translator(mut self, translator: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    pub fn registry(mut self, registry: Arc<SerializerRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<FileDocument, DocumentError> {
        let options = NodeOptions::shared();
        options.set_indent(self.indent)?;
        options.set_debug(self.debug);
        if let Some(translator) = self.translator {
            options.set_translator(move |text: &str| translator(text));
        }
        options.seal();

        let mut document = Document::with_options(options);
        if let Some(registry) = self.registry {
            document = document.with_registry(registry);
        }
        document.set_headers(self.headers);

        Ok(FileDocument::from_document(self.path, document))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::fs;

    use st_reflect::derive::Config;

    use super::{FileDocument, LoadFlags, LoadOutcome, LoadState};
    use crate::DocumentError;

    #[derive(Config, Default, Debug, PartialEq)]
    struct Limits {
        #[config(comment = "requests per second")]
        rate: u32,
        hosts: Vec<String>,
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/app.conf");

        let mut document = FileDocument::builder(&path).header("managed").build().unwrap();
        document
            .save_from(&Limits {
                rate: 10,
                hosts: vec!["a".into(), "b".into()],
            })
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "#! managed\n\n# requests per second\nrate = 10\nhosts [\n  a\n  b\n]\n"
        );

        let mut fresh = FileDocument::new(&path);
        let mut limits = Limits::default();
        let outcome = fresh.load_into(&mut limits, LoadFlags::new().comments(true)).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded);
        assert!(matches!(fresh.state(), LoadState::Loaded));
        assert_eq!(fresh.headers(), ["managed"]);
        assert_eq!(fresh.root().get("rate").unwrap().comments(), ["requests per second"]);
        assert_eq!(limits.rate, 10);
        assert_eq!(limits.hosts, ["a", "b"]);
    }

    #[test]
    fn backup_load_restores_previous_root() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.conf");
        let bad = dir.path().join("bad.conf");
        fs::write(&good, "#! original\nx = 1\n").unwrap();
        fs::write(&bad, "y = 2\nnested {\n  z = 3\n").unwrap();

        let mut document = FileDocument::new(&good);
        document.load(LoadFlags::new()).unwrap();

        // Same resident root, different file.
        let mut document = FileDocument::from_document(&bad, document.document().clone());
        let outcome = document.load(LoadFlags::new().backup(true)).unwrap();

        assert_eq!(outcome, LoadOutcome::Recovered);
        assert!(document.state().is_recovered());
        assert!(matches!(
            document.state().recovered_error(),
            Some(DocumentError::Node(_))
        ));
        assert_eq!(document.document().to_string(), "#! original\n\nx = 1\n");
    }

    #[test]
    fn backup_load_recovers_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut document = FileDocument::new(dir.path().join("absent.conf"));
        document.root_mut().add("kept", "yes").unwrap();

        let outcome = document.load(LoadFlags::new().backup(true)).unwrap();
        assert_eq!(outcome, LoadOutcome::Recovered);
        assert!(matches!(
            document.state().recovered_error(),
            Some(DocumentError::Io { .. })
        ));
        assert!(document.root().contains("kept"));
    }

    #[test]
    fn plain_load_fails_and_keeps_partial_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.conf");
        fs::write(&path, "y = 2\nnested {\n  z = 3\n").unwrap();

        let mut document = FileDocument::new(&path);
        document.root_mut().add("x", "1").unwrap();

        let err = document.load(LoadFlags::new()).unwrap_err();
        assert!(matches!(err, DocumentError::Node(_)));
        assert!(matches!(document.state(), LoadState::Failed));
        assert!(!document.root().contains("x"));
        assert!(document.root().contains("y"));
    }

    #[test]
    fn comments_are_dropped_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.conf");
        fs::write(&path, "# note\nx = 1\n").unwrap();

        let mut document = FileDocument::new(&path);
        document.load(LoadFlags::default()).unwrap();
        assert!(document.root().get("x").unwrap().comments().is_empty());
    }

    #[test]
    fn builder_seals_options() {
        let document = FileDocument::builder("unused.conf")
            .indent(3)
            .debug(true)
            .build()
            .unwrap();
        assert_eq!(document.options().indent(), 3);
        assert!(document.options().debug());
        assert!(document.options().set_indent(2).is_err());
    }
}
