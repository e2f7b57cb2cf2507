//! Module graph walker.
//!
//! Starting at an entry file, compiles every unit reachable through
//! `import` statements exactly once, in parallel. Each unit is keyed by
//! the name its importers use in the generated `import` path, which is
//! also its output file name:
//!
//! | import                   | source             | output                   |
//! |--------------------------|--------------------|--------------------------|
//! | `import a.b`             | `<root>/a/b.juice` | `<out>/a.b.js`           |
//! | `import internal a.b`    | `<root>/a/b.juice` | `<out>/<ns>.a.b.js`      |
//! | `import foreign a.b`     | `<root>/a/b.js`    | `<out>/a.b__foreign.js`  |
//!
//! Foreign modules are copied verbatim and never parsed.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use juice_compiler::{compile, CompileConfig, CompileError};
use juice_ir::Import;
use parking_lot::Mutex;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::DriverError;

/// Options for [`build`].
#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub namespace: String,
    pub out_dir: PathBuf,
    /// Write `prelude.js` next to the generated modules.
    pub prelude: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            namespace: "main".to_string(),
            out_dir: PathBuf::from("out"),
            prelude: true,
        }
    }
}

/// A unit that failed to build.
#[derive(Debug)]
pub enum BuildFailure {
    Compile {
        path: PathBuf,
        source: String,
        error: CompileError,
    },
    Io(DriverError),
}

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Every file written, sorted.
    pub written: Vec<PathBuf>,
    pub failures: Vec<BuildFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A source unit to compile.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Unit {
    /// Name in generated import paths and of the output file.
    key: String,
    /// Dotted module path; part of constructor tags.
    module_name: String,
    source_path: PathBuf,
}

#[derive(Debug)]
enum Dependency {
    Source(Unit),
    Foreign { key: String, from: PathBuf },
}

impl Dependency {
    fn key(&self) -> &str {
        match self {
            Dependency::Source(unit) => &unit.key,
            Dependency::Foreign { key, .. } => key,
        }
    }
}

struct Walker<'a> {
    root: PathBuf,
    options: &'a BuildOptions,
    seen: Mutex<FxHashSet<String>>,
    written: Mutex<Vec<PathBuf>>,
    failures: Mutex<Vec<BuildFailure>>,
}

/// Compile `entry` and everything it imports into `options.out_dir`.
///
/// Failing units are collected in the report; their importers and the
/// rest of the graph still build. Only a missing output directory or a
/// bad entry path fail the whole build.
#[tracing::instrument(level = "debug", skip(options), fields(out_dir = %options.out_dir.display()))]
pub fn build(entry: &Path, options: &BuildOptions) -> Result<BuildReport, DriverError> {
    let Some(stem) = entry.file_stem().and_then(OsStr::to_str) else {
        return Err(DriverError::InvalidEntry {
            path: entry.to_path_buf(),
        });
    };
    let root = entry
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&options.out_dir).map_err(|source| DriverError::Write {
        path: options.out_dir.clone(),
        source,
    })?;

    let entry_unit = Unit {
        key: stem.to_string(),
        module_name: stem.to_string(),
        source_path: entry.to_path_buf(),
    };
    let walker = Walker {
        root,
        options,
        seen: Mutex::new(FxHashSet::default()),
        written: Mutex::new(Vec::new()),
        failures: Mutex::new(Vec::new()),
    };
    walker.seen.lock().insert(entry_unit.key.clone());
    rayon::scope(|scope| walker.visit(scope, entry_unit));

    if options.prelude {
        let path = options.out_dir.join("prelude.js");
        match fs::write(&path, juice_codegen::PRELUDE) {
            Ok(()) => walker.written.lock().push(path),
            Err(source) => walker
                .failures
                .lock()
                .push(BuildFailure::Io(DriverError::Write { path, source })),
        }
    }

    let mut written = walker.written.into_inner();
    written.sort();
    Ok(BuildReport {
        written,
        failures: walker.failures.into_inner(),
    })
}

impl<'a> Walker<'a> {
    fn visit<'s>(&'s self, scope: &rayon::Scope<'s>, unit: Unit)
    where
        'a: 's,
    {
        let dependencies = match self.compile_unit(&unit) {
            Ok(dependencies) => dependencies,
            Err(failure) => {
                self.failures.lock().push(failure);
                return;
            }
        };
        for dependency in dependencies {
            if !self.seen.lock().insert(dependency.key().to_string()) {
                continue;
            }
            match dependency {
                Dependency::Source(unit) => scope.spawn(move |scope| self.visit(scope, unit)),
                Dependency::Foreign { key, from } => scope.spawn(move |_| {
                    if let Err(err) = self.copy_foreign(&key, &from) {
                        self.failures.lock().push(BuildFailure::Io(err));
                    }
                }),
            }
        }
    }

    fn compile_unit(&self, unit: &Unit) -> Result<Vec<Dependency>, BuildFailure> {
        debug!(module = %unit.key, path = %unit.source_path.display(), "compiling");
        let source = fs::read_to_string(&unit.source_path).map_err(|source| {
            BuildFailure::Io(DriverError::Read {
                path: unit.source_path.clone(),
                source,
            })
        })?;
        let config = CompileConfig::default()
            .with_namespace(self.options.namespace.as_str())
            .with_module_name(unit.module_name.as_str())
            .with_file_path(unit.source_path.display().to_string());
        let output = match compile(&source, &config) {
            Ok(output) => output,
            Err(error) => {
                return Err(BuildFailure::Compile {
                    path: unit.source_path.clone(),
                    source,
                    error,
                })
            }
        };

        let path = self.options.out_dir.join(format!("{}.js", unit.key));
        fs::write(&path, &output.code).map_err(|source| {
            BuildFailure::Io(DriverError::Write {
                path: path.clone(),
                source,
            })
        })?;
        self.written.lock().push(path);

        Ok(output.imports().map(|import| self.resolve(import)).collect())
    }

    fn resolve(&self, import: &Import) -> Dependency {
        let dotted = import.path.join(".");
        let relative: PathBuf = import.path.iter().collect();
        let mut key = if import.internal {
            format!("{}.{dotted}", self.options.namespace)
        } else {
            dotted.clone()
        };
        if import.foreign {
            key.push_str("__foreign");
            return Dependency::Foreign {
                key,
                from: self.root.join(relative).with_extension("js"),
            };
        }
        Dependency::Source(Unit {
            key,
            module_name: dotted,
            source_path: self.root.join(relative).with_extension("juice"),
        })
    }

    fn copy_foreign(&self, key: &str, from: &Path) -> Result<(), DriverError> {
        let to = self.options.out_dir.join(format!("{key}.js"));
        debug!(from = %from.display(), to = %to.display(), "copying foreign module");
        fs::copy(from, &to).map_err(|source| DriverError::CopyForeign {
            from: from.to_path_buf(),
            to: to.clone(),
            source,
        })?;
        self.written.lock().push(to);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
