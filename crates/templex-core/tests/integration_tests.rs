//! End-to-end exercises of `Engine::copy`/`Engine::update`, wired against
//! hand-rolled fakes for every port rather than `templex-adapters` — this
//! crate never depends on its own adapters, even in tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use templex_core::application::ports::{
    ApplyHunkStatus, RawTemplateConfig, RenderedQuestion, VersionControl,
};
use templex_core::application::{
    ApplicationError, CopyOptions, Engine, Filesystem, ProcessRunner, Prompter,
    TemplateConfigLoader, TemplateEngine,
};
use templex_core::domain::{EnvOps, Question, RenderContext, Task, TaskCommand, TemplateRef, Value};

/// An in-memory filesystem: files keyed by absolute path, directories
/// tracked as a separate set so empty ones are still visible to `is_dir`.
struct FakeFilesystem {
    files: RefCell<HashMap<PathBuf, Vec<u8>>>,
    dirs: RefCell<HashSet<PathBuf>>,
}

impl FakeFilesystem {
    fn new() -> Self {
        Self {
            files: RefCell::new(HashMap::new()),
            dirs: RefCell::new(HashSet::new()),
        }
    }

    fn seed_file(&self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        let path = path.into();
        let mut parent = path.parent();
        while let Some(p) = parent {
            if p.as_os_str().is_empty() {
                break;
            }
            self.dirs.borrow_mut().insert(p.to_path_buf());
            parent = p.parent();
        }
        self.files.borrow_mut().insert(path, contents.into());
    }

    fn read(&self, path: impl AsRef<Path>) -> Vec<u8> {
        self.files
            .borrow()
            .get(path.as_ref())
            .cloned()
            .unwrap_or_else(|| panic!("missing file: {}", path.as_ref().display()))
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        self.dirs.borrow_mut().insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &[u8]) -> Result<(), ApplicationError> {
        if let Some(parent) = path.parent() {
            self.dirs.borrow_mut().insert(parent.to_path_buf());
        }
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<Vec<u8>, ApplicationError> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| ApplicationError::FilesystemError {
                path: path.display().to_string(),
                reason: "not found".to_string(),
            })
    }

    fn read_to_string(&self, path: &Path) -> Result<String, ApplicationError> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| ApplicationError::FilesystemError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.borrow().contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), ApplicationError> {
        let prefix = path.to_path_buf();
        self.files.borrow_mut().retain(|p, _| !p.starts_with(&prefix));
        self.dirs.borrow_mut().retain(|p| !p.starts_with(&prefix));
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), ApplicationError> {
        self.files.borrow_mut().remove(path);
        Ok(())
    }

    fn read_dir_sorted(&self, path: &Path) -> Result<Vec<PathBuf>, ApplicationError> {
        let mut children: HashSet<PathBuf> = HashSet::new();
        for p in self.files.borrow().keys() {
            if p.parent() == Some(path) {
                children.insert(p.clone());
            }
        }
        for p in self.dirs.borrow().iter() {
            if p.parent() == Some(path) {
                children.insert(p.clone());
            }
        }
        let mut out: Vec<PathBuf> = children.into_iter().collect();
        out.sort();
        Ok(out)
    }

    fn glob(&self, base: &Path, pattern: &str) -> Result<Vec<PathBuf>, ApplicationError> {
        let pattern = glob::Pattern::new(pattern).map_err(|e| ApplicationError::FilesystemError {
            path: base.display().to_string(),
            reason: e.to_string(),
        })?;
        let mut out: Vec<PathBuf> = self
            .files
            .borrow()
            .keys()
            .filter(|p| p.starts_with(base) && pattern.matches(&p.to_string_lossy()))
            .cloned()
            .collect();
        out.sort();
        Ok(out)
    }
}

/// Substitutes `{{ key }}` against `ctx.answers`, ignoring `envops` — this
/// is a fake, not a Jinja engine.
struct FakeTemplateEngine;

impl TemplateEngine for FakeTemplateEngine {
    fn render_str(
        &self,
        template: &str,
        ctx: &RenderContext,
        _envops: &EnvOps,
    ) -> Result<String, ApplicationError> {
        let mut out = String::new();
        let mut rest = template;
        while let Some(start) = rest.find("{{") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after.find("}}").ok_or_else(|| ApplicationError::RenderingFailed {
                path: template.to_string(),
                reason: "unterminated {{ expression".to_string(),
            })?;
            let key = after[..end].trim();
            match ctx.get(key) {
                Some(value) => out.push_str(&value.to_string()),
                None => out.push_str(&format!("{{{{ {key} }}}}")),
            }
            rest = &after[end + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Always answers with the rendered default, never blocking — questions in
/// these tests are only exercised with `ask_user: false`.
struct FakePrompter;

impl Prompter for FakePrompter {
    fn is_interactive(&self) -> bool {
        false
    }

    fn ask(
        &self,
        _question: &Question,
        rendered: &RenderedQuestion<'_>,
    ) -> Result<String, ApplicationError> {
        Ok(rendered.default_display.clone())
    }

    fn confirm(&self, _message: &str, default: bool) -> Result<bool, ApplicationError> {
        Ok(default)
    }
}

struct FakeProcessRunner {
    invocations: RefCell<Vec<String>>,
}

impl FakeProcessRunner {
    fn new() -> Self {
        Self {
            invocations: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run(
        &self,
        _cwd: &Path,
        command: &TaskCommand,
        _extra_env: &[(String, String)],
    ) -> Result<i32, ApplicationError> {
        let label = match command {
            TaskCommand::Shell(s) => s.clone(),
            TaskCommand::Argv(parts) => parts.join(" "),
        };
        self.invocations.borrow_mut().push(label);
        Ok(0)
    }
}

/// Returns a fixed config built ahead of time — the loader port is
/// config-file-format-specific, which a fake has no business caring about.
struct FakeConfigLoader {
    config: RawTemplateConfig,
}

impl TemplateConfigLoader for FakeConfigLoader {
    fn load(&self, _template_root: &Path) -> Result<RawTemplateConfig, ApplicationError> {
        Ok(self.config.clone())
    }
}

/// A `VersionControl` stub for local (non-VCS) template paths: `copy()`
/// never reaches any method beyond `is_repo_url`, and `update()` only needs
/// `is_clean` to gate on a dirty destination.
struct FakeVcs {
    clean: bool,
}

impl VersionControl for FakeVcs {
    fn is_repo_url(&self, _url: &str) -> bool {
        false
    }

    fn clone(&self, _url: &str, _vcs_ref: Option<&str>) -> Result<PathBuf, ApplicationError> {
        unreachable!("local template paths never clone")
    }

    fn checkout(&self, _path: &Path, _vcs_ref: &str) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn describe(&self, _path: &Path) -> Result<String, ApplicationError> {
        unreachable!()
    }

    fn tags(&self, _path: &Path) -> Result<Vec<String>, ApplicationError> {
        unreachable!()
    }

    fn is_clean(&self, _path: &Path) -> Result<bool, ApplicationError> {
        Ok(self.clean)
    }

    fn init(&self, _path: &Path) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn add_all(&self, _path: &Path) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn commit(&self, _path: &Path, _message: &str, _allow_empty: bool) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn set_config(&self, _path: &Path, _key: &str, _value: &str) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn add_remote(&self, _path: &Path, _name: &str, _url: &str) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn fetch(
        &self,
        _path: &Path,
        _remote: &str,
        _refspec: &str,
        _depth: u32,
    ) -> Result<(), ApplicationError> {
        unreachable!()
    }

    fn diff(
        &self,
        _path: &Path,
        _range: &str,
        _inter_hunk_context: Option<i64>,
    ) -> Result<String, ApplicationError> {
        unreachable!()
    }

    fn apply(
        &self,
        _path: &Path,
        _diff: &str,
        _excludes: &[String],
    ) -> Result<Vec<ApplyHunkStatus>, ApplicationError> {
        unreachable!()
    }
}

fn seed_template(fs: &FakeFilesystem) {
    fs.seed_file("/template/README.md", "static file, never touched\n");
    fs.seed_file(
        "/template/name.txt.tmpl",
        "Hello, {{ name }}! Welcome to {{ project_slug }}.",
    );
}

fn config_with_questions(questions: Vec<Question>) -> RawTemplateConfig {
    RawTemplateConfig {
        questions,
        ..Default::default()
    }
}

#[test]
fn copy_renders_templated_files_and_leaves_static_files_untouched() {
    let fs = FakeFilesystem::new();
    seed_template(&fs);

    let vcs = FakeVcs { clean: true };
    let config_loader = FakeConfigLoader {
        config: RawTemplateConfig {
            tasks: vec![Task::shell("setup")],
            ..Default::default()
        },
    };
    let engine = FakeTemplateEngine;
    let prompter = FakePrompter;
    let process = FakeProcessRunner::new();

    let application = Engine::new(&vcs, &config_loader, &fs, &engine, &prompter, &process);

    let mut forced = BTreeMap::new();
    forced.insert("name".to_string(), Value::Str("demo".to_string()));
    forced.insert(
        "project_slug".to_string(),
        Value::Str("demo-project".to_string()),
    );
    let options = CopyOptions {
        forced_answers: forced,
        ask_user: false,
        ..Default::default()
    };

    let template_ref = TemplateRef::new("/template");
    let result = application
        .copy(&template_ref, Path::new("/dst"), &options)
        .expect("copy should succeed against an in-memory template");

    assert_eq!(result.url, "/template");
    assert_eq!(
        fs.read("/dst/README.md"),
        b"static file, never touched\n".to_vec()
    );
    assert_eq!(
        fs.read("/dst/name.txt"),
        b"Hello, demo! Welcome to demo-project.".to_vec()
    );
    assert!(!fs.exists(Path::new("/dst/name.txt.tmpl")));

    let answers_file = fs.read("/dst/.copier-answers.yml");
    let answers_file = String::from_utf8(answers_file).unwrap();
    assert!(answers_file.contains("_src_path"));
    assert!(answers_file.contains("demo"));

    assert_eq!(process.invocations.borrow().len(), 1);
}

#[test]
fn copy_uses_question_defaults_when_not_forced_and_not_interactive() {
    let fs = FakeFilesystem::new();
    fs.seed_file("/template/name.txt.tmpl", "Hello, {{ name }}!");

    let vcs = FakeVcs { clean: true };
    let mut question = Question::new("name");
    question.question_type_raw = "str".to_string();
    question.default_raw = Some(Value::Str("anonymous".to_string()));
    let config_loader = FakeConfigLoader {
        config: config_with_questions(vec![question]),
    };
    let engine = FakeTemplateEngine;
    let prompter = FakePrompter;
    let process = FakeProcessRunner::new();

    let application = Engine::new(&vcs, &config_loader, &fs, &engine, &prompter, &process);
    let options = CopyOptions {
        ask_user: false,
        ..Default::default()
    };

    let template_ref = TemplateRef::new("/template");
    application
        .copy(&template_ref, Path::new("/dst"), &options)
        .expect("copy should succeed using the question's declared default");

    assert_eq!(fs.read("/dst/name.txt"), b"Hello, anonymous!".to_vec());
}

#[test]
fn copy_excludes_default_patterns_like_copier_config_files() {
    let fs = FakeFilesystem::new();
    fs.seed_file("/template/copier.yml", "questions: []");
    fs.seed_file("/template/app.txt", "kept");

    let vcs = FakeVcs { clean: true };
    let config_loader = FakeConfigLoader {
        config: RawTemplateConfig::default(),
    };
    let engine = FakeTemplateEngine;
    let prompter = FakePrompter;
    let process = FakeProcessRunner::new();

    let application = Engine::new(&vcs, &config_loader, &fs, &engine, &prompter, &process);
    let options = CopyOptions {
        ask_user: false,
        ..Default::default()
    };

    let template_ref = TemplateRef::new("/template");
    application
        .copy(&template_ref, Path::new("/dst"), &options)
        .unwrap();

    assert!(!fs.exists(Path::new("/dst/copier.yml")));
    assert_eq!(fs.read("/dst/app.txt"), b"kept".to_vec());
}

#[test]
fn copy_cleans_up_a_freshly_created_destination_on_failure() {
    let fs = FakeFilesystem::new();
    // No template seeded at all: resolution fails before anything renders.
    let vcs = FakeVcs { clean: true };
    let config_loader = FakeConfigLoader {
        config: RawTemplateConfig::default(),
    };
    let engine = FakeTemplateEngine;
    let prompter = FakePrompter;
    let process = FakeProcessRunner::new();

    let application = Engine::new(&vcs, &config_loader, &fs, &engine, &prompter, &process);
    let options = CopyOptions::default();

    let template_ref = TemplateRef::new("/does-not-exist");
    let err = application
        .copy(&template_ref, Path::new("/dst"), &options)
        .unwrap_err();

    assert!(matches!(err, ApplicationError::TemplateResolutionFailed { .. }));
    assert!(!fs.exists(Path::new("/dst")));
}

#[test]
fn update_refuses_to_run_against_a_dirty_working_tree() {
    let fs = FakeFilesystem::new();
    fs.seed_file(
        "/dst/.copier-answers.yml",
        "_src_path: /template\n_commit: v1.0.0\n",
    );

    let vcs = FakeVcs { clean: false };
    let config_loader = FakeConfigLoader {
        config: RawTemplateConfig::default(),
    };
    let engine = FakeTemplateEngine;
    let prompter = FakePrompter;
    let process = FakeProcessRunner::new();

    let application = Engine::new(&vcs, &config_loader, &fs, &engine, &prompter, &process);
    let template_ref = TemplateRef::new("/template");

    let err = application
        .update(Path::new("/dst"), &template_ref, &CopyOptions::default())
        .unwrap_err();

    assert!(matches!(err, ApplicationError::VcsOperationFailed { .. }));
}
