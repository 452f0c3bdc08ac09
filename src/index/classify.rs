//! Design / testbench / test classification of source files.

use serde::Serialize;

use super::types::{FileCategory, FileRecord};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::project::Project;
use crate::scan::{Diagnostics, SourceFile};

/// Design sources split by category, each list in traversal order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassifiedFiles {
    pub design_files: Vec<String>,
    pub testbench_files: Vec<String>,
    pub test_files: Vec<String>,
    pub diagnostics: Diagnostics,
}

impl ClassifiedFiles {
    /// Every classified file as a record, design files first.
    pub fn records(&self) -> impl Iterator<Item = FileRecord> + '_ {
        tagged(&self.design_files, FileCategory::Design)
            .chain(tagged(&self.testbench_files, FileCategory::Testbench))
            .chain(tagged(&self.test_files, FileCategory::Test))
    }

    pub fn len(&self) -> usize {
        self.design_files.len() + self.testbench_files.len() + self.test_files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, category: FileCategory, path: String) {
        match category {
            FileCategory::Design => self.design_files.push(path),
            FileCategory::Testbench => self.testbench_files.push(path),
            FileCategory::Test => self.test_files.push(path),
        }
    }
}

fn tagged(files: &[String], category: FileCategory) -> impl Iterator<Item = FileRecord> + '_ {
    files.iter().map(move |path| FileRecord {
        relative_path: path.clone(),
        category,
    })
}

/// Categorise one design file from its root-relative location.
///
/// A file lives in testbench code when any segment of its directory contains
/// one of the testbench markers. Within testbench code, a file whose name
/// contains a test-file marker is a test.
pub fn categorize(file: &SourceFile, config: &ScanConfig) -> FileCategory {
    let in_testbench = file
        .parent_dir()
        .split('/')
        .any(|segment| config.testbench_markers.iter().any(|m| segment.contains(m.as_str())));

    if !in_testbench {
        return FileCategory::Design;
    }
    let name = file.file_name();
    if config.test_file_markers.iter().any(|m| name.contains(m.as_str())) {
        FileCategory::Test
    } else {
        FileCategory::Testbench
    }
}

/// Classify every design source under the project root.
pub fn classify(project: &Project) -> Result<ClassifiedFiles> {
    let mut classified = ClassifiedFiles::default();
    let files = project.walk(
        Some(project.config().design_extensions.as_slice()),
        &mut classified.diagnostics,
    )?;

    for file in files {
        let category = categorize(&file, project.config());
        classified.push(category, file.relative);
    }

    tracing::debug!(
        design = classified.design_files.len(),
        testbench = classified.testbench_files.len(),
        test = classified.test_files.len(),
        "classified design sources"
    );
    Ok(classified)
}
