//! Value types produced by argument classification.
//!
//! Flags and source buckets are small presence-plus-values records, built up
//! during the single pass over the token stream and consumed once by the
//! command synthesizer.

/// A recognized option: whether it appeared, plus any captured values.
///
/// Single-value flags (`-o`, `-MT`, `-MF`) keep at most one captured value;
/// a flag that never appeared has an empty value list.
#[derive(Debug, Default, Clone)]
pub struct Flag {
    present: bool,
    values: Vec<String>,
}

impl Flag {
    /// Marks the flag as present without capturing a value.
    pub fn set(&mut self) {
        self.present = true;
    }

    /// Captures the value of a single-value flag; a later capture replaces an
    /// earlier one, mirroring last-occurrence-wins in the backend compiler.
    pub fn capture(&mut self, value: String) {
        self.present = true;
        self.values = vec![value];
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Classification group for one source language: presence plus an ordered
/// list of file-path tokens. A filename belongs to exactly one bucket.
#[derive(Debug, Default, Clone)]
pub struct SourceBucket {
    present: bool,
    files: Vec<String>,
}

impl SourceBucket {
    /// Marks the bucket active without adding a file; an explicit language
    /// marker does this even when no files follow it.
    pub fn set_present(&mut self) {
        self.present = true;
    }

    pub fn push(&mut self, file: String) {
        self.present = true;
        self.files.push(file);
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Moves this bucket's files into `other`, leaving this bucket inactive.
    pub fn drain_into(&mut self, other: &mut SourceBucket) {
        if self.present {
            other.present = true;
        }
        other.files.append(&mut self.files);
        self.present = false;
    }
}

/// Languages with an explicit `-x<lang>` override marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    C,
    Cxx,
    Kernel,
}

impl Lang {
    /// Marker spelling emitted in the synthesized command.
    pub fn marker(self) -> &'static str {
        match self {
            Lang::C => "-x c",
            Lang::Cxx => "-x c++",
            Lang::Kernel => "-x hip",
        }
    }
}

/// Everything the classifier learned from one invocation's argument list.
#[derive(Debug, Clone)]
pub struct InvocationOptions {
    pub compile_only: Flag,
    pub output: Flag,
    /// `-MT`: dependency-target override.
    pub dep_target: Flag,
    /// `-MF`: dependency-file override.
    pub dep_file: Flag,
    pub rdc: Flag,
    pub offload: Flag,
    pub print_version: Flag,
    pub print_cxxflags: Flag,
    pub print_ldflags: Flag,

    pub sources_c: SourceBucket,
    pub sources_cxx: SourceBucket,
    pub sources_kernel: SourceBucket,
    pub objects: SourceBucket,

    /// An explicit `-x<lang>` override occurred somewhere in the arguments.
    pub dash_x_active: bool,
    /// No source bucket other than objects is populated; nothing to compile.
    pub link_only: bool,
    /// Cleared by the print-info flags, which must not invoke the compiler.
    pub run_cmd: bool,
}

impl Default for InvocationOptions {
    fn default() -> Self {
        InvocationOptions {
            compile_only: Flag::default(),
            output: Flag::default(),
            dep_target: Flag::default(),
            dep_file: Flag::default(),
            rdc: Flag::default(),
            offload: Flag::default(),
            print_version: Flag::default(),
            print_cxxflags: Flag::default(),
            print_ldflags: Flag::default(),
            sources_c: SourceBucket::default(),
            sources_cxx: SourceBucket::default(),
            sources_kernel: SourceBucket::default(),
            objects: SourceBucket::default(),
            dash_x_active: false,
            link_only: false,
            run_cmd: true,
        }
    }
}

impl InvocationOptions {
    pub fn bucket_mut(&mut self, lang: Lang) -> &mut SourceBucket {
        match lang {
            Lang::C => &mut self.sources_c,
            Lang::Cxx => &mut self.sources_cxx,
            Lang::Kernel => &mut self.sources_kernel,
        }
    }

    pub fn bucket(&self, lang: Lang) -> &SourceBucket {
        match lang {
            Lang::C => &self.sources_c,
            Lang::Cxx => &self.sources_cxx,
            Lang::Kernel => &self.sources_kernel,
        }
    }
}
