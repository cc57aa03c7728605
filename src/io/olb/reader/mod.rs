//! Reader orchestrator: walks an extracted container tree, drives the
//! per-stream parsers in a fixed order, and assembles the [`Library`].
//!
//! # Architecture
//!
//! The read pipeline is:
//!
//! 1. Classify the input by extension and extract the container into a
//!    scratch directory (skipped when parsing a pre-extracted tree).
//! 2. Locate the expected streams; required ones that are absent abort the
//!    run with `FilesystemMissing`.
//! 3. Parse, in order: the seven directory listings, administrative
//!    streams, the `$Types$` lists, the `Library` globals, the cache, then
//!    every package, symbol, schematic, hierarchy and page.
//! 4. Each per-stream parse is wrapped: in failsafe mode (the default) an
//!    error marks the stream failed, bumps the error counter and leaves the
//!    library partially populated; in strict mode it aborts the run.

pub mod context;
pub mod geometry;
pub mod records;
pub mod streams;

pub use context::StreamContext;

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};

use crate::error::{OlbError, Result};
use crate::io::olb::data_stream::DataStream;
use crate::io::olb::extractor::{ContainerExtractor, ExtractionDir};
use crate::library::{Library, SymbolsLibrary};
use crate::notification::{NotificationCollection, NotificationType};
use crate::types::{ComponentType, FileFormatVersion, FileType};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration options for the reader.
#[derive(Debug, Clone)]
pub struct OlbReaderConfiguration {
    /// When `true` (the default), parse errors inside individual streams
    /// are caught, counted and reported; the run continues with the other
    /// streams.  When `false` the first stream error aborts the read.
    pub failsafe: bool,

    /// Layout generation of the container's streams.
    pub version: FileFormatVersion,
}

impl Default for OlbReaderConfiguration {
    fn default() -> Self {
        Self {
            failsafe: true,
            version: FileFormatVersion::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Expected stream layout
// ---------------------------------------------------------------------------

/// Resolved paths of the expected streams inside an extracted root.
struct FileSet {
    admin_data: Option<PathBuf>,
    cache: PathBuf,
    cells_dir: Option<PathBuf>,
    export_blocks_dir: PathBuf,
    graphics_dir: PathBuf,
    graphics_types: PathBuf,
    library: PathBuf,
    net_bundle_map: Option<PathBuf>,
    packages_dir: PathBuf,
    packages: Vec<PathBuf>,
    parts_dir: PathBuf,
    symbols_dir: PathBuf,
    symbols_types: PathBuf,
    symbols: Vec<PathBuf>,
    views_dir: PathBuf,
    /// `(view name, Schematic.bin)` per view folder.
    schematics: Vec<(String, PathBuf)>,
    /// `(view name, Hierarchy.bin)` where present.
    hierarchies: Vec<(String, PathBuf)>,
    /// `(view name/page name, page stream)` in view order.
    pages: Vec<(String, PathBuf)>,
    hs_objects: Option<PathBuf>,
    dsn_stream: Option<PathBuf>,
}

fn sanity_file_exists(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(OlbError::FilesystemMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn sanity_folder_exists(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(OlbError::FilesystemMissing {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// List a directory's entries sorted by name. Filesystem order is not
/// stable across platforms and the parse order must be deterministic.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .collect::<std::io::Result<Vec<_>>>()?
        .into_iter()
        .map(|e| e.path())
        .collect();
    entries.sort();
    Ok(entries)
}

impl FileSet {
    fn populate(root: &Path) -> Result<Self> {
        sanity_folder_exists(root)?;

        let optional = |p: PathBuf| if p.is_file() { Some(p) } else { None };

        let library = root.join("Library.bin");
        sanity_file_exists(&library)?;

        let cache = root.join("Cache.bin");
        sanity_file_exists(&cache)?;

        let cells = root.join("Cells");
        sanity_folder_exists(&cells)?;

        let export_blocks = root.join("ExportBlocks");
        sanity_folder_exists(&export_blocks)?;
        let export_blocks_dir = root.join("ExportBlocks Directory.bin");
        sanity_file_exists(&export_blocks_dir)?;

        let graphics = root.join("Graphics");
        sanity_folder_exists(&graphics)?;
        let graphics_dir = root.join("Graphics Directory.bin");
        sanity_file_exists(&graphics_dir)?;
        let graphics_types = graphics.join("$Types$.bin");
        sanity_file_exists(&graphics_types)?;

        let packages = root.join("Packages");
        sanity_folder_exists(&packages)?;
        let packages_dir = root.join("Packages Directory.bin");
        sanity_file_exists(&packages_dir)?;
        let package_files = sorted_entries(&packages)?
            .into_iter()
            .filter(|p| p.is_file())
            .collect();

        let parts = root.join("Parts");
        sanity_folder_exists(&parts)?;
        let parts_dir = root.join("Parts Directory.bin");
        sanity_file_exists(&parts_dir)?;

        let symbols = root.join("Symbols");
        sanity_folder_exists(&symbols)?;
        let symbols_dir = root.join("Symbols Directory.bin");
        sanity_file_exists(&symbols_dir)?;
        let symbols_types = symbols.join("$Types$.bin");
        sanity_file_exists(&symbols_types)?;

        // The ERC and $Types$ streams carry additional information but are
        // no symbols.
        let symbol_files = sorted_entries(&symbols)?
            .into_iter()
            .filter(|p| {
                p.is_file()
                    && p.file_name()
                        .map(|n| n != "$Types$.bin" && n != "ERC.bin")
                        .unwrap_or(false)
            })
            .collect();

        let views = root.join("Views");
        sanity_folder_exists(&views)?;
        let views_dir = root.join("Views Directory.bin");
        sanity_file_exists(&views_dir)?;

        let mut schematics = Vec::new();
        let mut hierarchies = Vec::new();
        let mut pages = Vec::new();
        for view in sorted_entries(&views)? {
            if !view.is_dir() {
                return Err(OlbError::FilesystemMissing { path: view });
            }

            let view_name = view
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            let schematic = view.join("Schematic.bin");
            sanity_file_exists(&schematic)?;
            schematics.push((view_name.clone(), schematic));

            let hierarchy = view.join("Hierarchy").join("Hierarchy.bin");
            if hierarchy.is_file() {
                hierarchies.push((view_name.clone(), hierarchy));
            }

            let pages_dir = view.join("Pages");
            if pages_dir.is_dir() {
                for page in sorted_entries(&pages_dir)? {
                    if !page.is_file() {
                        return Err(OlbError::FilesystemMissing { path: page });
                    }
                    let stem = page
                        .file_stem()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    pages.push((format!("{view_name}/{stem}"), page));
                }
            }
        }

        Ok(Self {
            admin_data: optional(root.join("AdminData.bin")),
            cache,
            cells_dir: optional(root.join("Cells Directory.bin")),
            export_blocks_dir,
            graphics_dir,
            graphics_types,
            library,
            net_bundle_map: optional(root.join("NetBundleMapData.bin")),
            packages_dir,
            packages: package_files,
            parts_dir,
            symbols_dir,
            symbols_types,
            symbols: symbol_files,
            views_dir,
            schematics,
            hierarchies,
            pages,
            hs_objects: optional(root.join("HSObjects.bin")),
            dsn_stream: optional(root.join("DsnStream.bin")),
        })
    }
}

// ---------------------------------------------------------------------------
// OlbReader
// ---------------------------------------------------------------------------

/// Reads an extracted container tree and produces a [`Library`].
#[derive(Debug)]
pub struct OlbReader {
    /// Root of the extracted stream tree.
    root: PathBuf,

    /// Scratch directory holding the extraction; removed on drop.
    _scratch: Option<ExtractionDir>,

    /// Classification of the input file.
    file_type: FileType,

    /// User configuration.
    config: OlbReaderConfiguration,

    /// Streams opened for parsing.
    file_ctr: usize,
    /// Streams that failed somewhere.
    file_err_ctr: usize,

    /// Files of the tree that have not been parsed yet.
    remaining_files: Vec<PathBuf>,

    /// Notifications collected across all streams.
    notifications: NotificationCollection,
}

impl OlbReader {
    /// Open a container file: classify it by extension, extract it through
    /// `extractor` into a fresh scratch directory, and prepare parsing.
    pub fn from_file<P: AsRef<Path>, E: ContainerExtractor>(
        path: P,
        extractor: &E,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file_type = FileType::from_extension(path)?;

        let scratch = ExtractionDir::scratch()?;
        let root = extractor.extract(path, scratch.path())?;

        Ok(Self {
            root,
            _scratch: Some(scratch),
            file_type,
            config: OlbReaderConfiguration::default(),
            file_ctr: 0,
            file_err_ctr: 0,
            remaining_files: Vec::new(),
            notifications: NotificationCollection::new(),
        })
    }

    /// Parse an already-extracted tree in place. Nothing is removed on
    /// drop.
    pub fn from_extracted<P: AsRef<Path>>(root: P, file_type: FileType) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            _scratch: None,
            file_type,
            config: OlbReaderConfiguration::default(),
            file_ctr: 0,
            file_err_ctr: 0,
            remaining_files: Vec::new(),
            notifications: NotificationCollection::new(),
        }
    }

    /// Set configuration options.
    pub fn with_config(mut self, config: OlbReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Classification of the input file.
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Number of streams opened for parsing so far.
    pub fn file_ctr(&self) -> usize {
        self.file_ctr
    }

    /// Number of streams that failed so far.
    pub fn file_err_ctr(&self) -> usize {
        self.file_err_ctr
    }

    /// Parse every stream of the container and assemble the library.
    pub fn read(&mut self) -> Result<Library> {
        info!("Start parsing library {}", self.root.display());

        let files = FileSet::populate(&self.root)?;
        self.remaining_files = collect_files(&self.root)?;

        let mut lib = Library::new();

        // Directory listings first.
        lib.export_blocks_dir = self
            .parse_stream(&files.export_blocks_dir, None, |c| c.parse_directory(None))?
            .unwrap_or_default();
        lib.graphics_dir = self
            .parse_stream(&files.graphics_dir, None, |c| c.parse_directory(None))?
            .unwrap_or_default();
        lib.packages_dir = self
            .parse_stream(&files.packages_dir, None, |c| c.parse_directory(None))?
            .unwrap_or_default();
        lib.parts_dir = self
            .parse_stream(&files.parts_dir, None, |c| c.parse_directory(None))?
            .unwrap_or_default();
        lib.symbols_dir = self
            .parse_stream(&files.symbols_dir, None, |c| c.parse_directory(None))?
            .unwrap_or_default();
        if let Some(path) = files.cells_dir.clone() {
            lib.cells_dir = self.parse_stream(&path, None, |c| c.parse_directory(None))?;
        }
        lib.views_dir = self
            .parse_stream(&files.views_dir, None, |c| {
                c.parse_directory(Some(ComponentType::View))
            })?
            .unwrap_or_default();

        // Administrative streams.
        if let Some(path) = files.admin_data.clone() {
            lib.admin_data = self.parse_stream(&path, None, |c| c.parse_admin_data())?;
        }
        if let Some(path) = files.net_bundle_map.clone() {
            lib.net_bundle_map =
                self.parse_stream(&path, None, |c| c.parse_net_bundle_map_data())?;
        }

        // Component type lists.
        lib.graphics_types = self
            .parse_stream(&files.graphics_types, None, |c| c.parse_types())?
            .unwrap_or_default();
        lib.symbols_types = self
            .parse_stream(&files.symbols_types, None, |c| c.parse_types())?
            .unwrap_or_default();

        // Library globals: string table and text fonts. Everything after
        // this point resolves indices against them.
        lib.symbols_library = self
            .parse_stream(&files.library, None, |c| c.parse_symbols_library())?
            .unwrap_or_default();

        lib.cache = self
            .parse_stream(&files.cache, None, |c| c.parse_cache())?
            .unwrap_or_default();

        if let Some(path) = files.dsn_stream.clone() {
            self.parse_stream(&path, None, |c| c.parse_dsn_stream())?;
        }
        if let Some(path) = files.hs_objects.clone() {
            self.parse_stream(&path, None, |c| c.parse_hs_objects())?;
        }

        for path in &files.packages {
            let parsed = self.parse_stream(path, Some(&lib.symbols_library), |c| {
                c.parse_package()
            })?;
            if let Some(package) = parsed {
                lib.packages.push(package);
            }
        }

        for path in &files.symbols {
            let parsed =
                self.parse_stream(path, Some(&lib.symbols_library), |c| c.parse_symbol())?;
            if let Some(symbol) = parsed {
                lib.symbols.push(symbol);
            }
        }

        for (name, path) in &files.schematics {
            let parsed =
                self.parse_stream(path, Some(&lib.symbols_library), |c| c.parse_schematic())?;
            if let Some(schematic) = parsed {
                lib.schematics.insert(name.clone(), schematic);
            }
        }

        for (name, path) in &files.hierarchies {
            let parsed =
                self.parse_stream(path, Some(&lib.symbols_library), |c| c.parse_hierarchy())?;
            if let Some(hierarchy) = parsed {
                lib.hierarchies.insert(name.clone(), hierarchy);
            }
        }

        for (name, path) in &files.pages {
            let parsed =
                self.parse_stream(path, Some(&lib.symbols_library), |c| c.parse_page())?;
            if let Some(page) = parsed {
                lib.pages.insert(name.clone(), page);
            }
        }

        // Anything left over was not understood by this run.
        for path in &self.remaining_files {
            log::warn!("stream was not parsed: {}", path.display());
            self.notifications.notify(
                NotificationType::Warning,
                format!("stream was not parsed: {}", path.display()),
            );
        }

        info!("Errors in {}/{} files!", self.file_err_ctr, self.file_ctr);

        lib.notifications = std::mem::take(&mut self.notifications);

        Ok(lib)
    }

    // ------------------------------------------------------------------
    // Per-stream wrapper
    // ------------------------------------------------------------------

    /// Open one stream and run `f` over it.
    ///
    /// Failures are fatal to the stream only: in failsafe mode the error is
    /// counted and logged and `None` is returned.
    fn parse_stream<T>(
        &mut self,
        path: &Path,
        library: Option<&SymbolsLibrary>,
        f: impl FnOnce(&mut StreamContext) -> Result<T>,
    ) -> Result<Option<T>> {
        info!("Opening file: {}", path.display());

        self.file_ctr += 1;
        self.mark_parsed(path);

        let ds = match DataStream::from_file(path) {
            Ok(ds) => ds,
            Err(e) => return self.stream_failed(path, e),
        };

        let mut ctx = StreamContext::new(ds, self.config.version).with_library(library);
        let result = f(&mut ctx);

        self.notifications.extend(ctx.ds.take_notes());

        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => self.stream_failed(path, e),
        }
    }

    fn stream_failed<T>(&mut self, path: &Path, e: OlbError) -> Result<Option<T>> {
        self.file_err_ctr += 1;

        error!("--------ERROR REPORT--------");
        error!("File: {}", path.display());
        error!("Error Message: {e}");

        self.notifications.notify(
            NotificationType::Error,
            format!("{}: {e}", path.display()),
        );

        if self.config.failsafe {
            Ok(None)
        } else {
            Err(e)
        }
    }

    fn mark_parsed(&mut self, path: &Path) {
        self.remaining_files.retain(|p| p != path);
    }
}

/// Recursively collect the regular files of a tree, sorted for stable
/// order.
fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in sorted_entries(dir)? {
        if entry.is_dir() {
            files.extend(collect_files(&entry)?);
        } else if entry.is_file() {
            files.push(entry);
        }
    }
    Ok(files)
}
