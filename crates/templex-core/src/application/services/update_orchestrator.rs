//! Update Orchestrator (§4.G): the shadow-worker update algorithm.
//!
//! Ties every other service together into the two top-level operations
//! (`copy`, `update`). Mirrors Copier's `Worker.run_copy`/`Worker.run_update`:
//! an update re-renders the old and new template revisions into throwaway
//! trees, diffs them with git, and applies that diff on top of a fresh
//! render of the new revision into the real destination.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::application::ports::output::{
    Filesystem, ProcessRunner, Prompter, TemplateConfigLoader, TemplateEngine, VersionControl,
};
use crate::application::services::question_resolver::QuestionResolver;
use crate::application::services::render_pipeline::{RenderOptions, RenderPipeline};
use crate::application::services::task_runner::TaskRunner;
use crate::application::services::template_resolver::TemplateResolver;
use crate::domain::{
    AnswersMap, DomainValidator, MigrationStage, RelativePath, RenderContext, Subproject, Template,
    TemplateRef, Value, parse_template_version,
};

#[derive(Debug, Clone, Default)]
pub struct CopyOptions {
    pub answers_file: Option<String>,
    pub forced_answers: BTreeMap<String, Value>,
    pub extra_exclude: Vec<String>,
    pub extra_skip_if_exists: Vec<String>,
    pub force: bool,
    pub pretend: bool,
    pub quiet: bool,
    pub ask_user: bool,
    pub cleanup_on_error: bool,
}

pub struct Engine<'a> {
    vcs: &'a dyn VersionControl,
    config_loader: &'a dyn TemplateConfigLoader,
    fs: &'a dyn Filesystem,
    engine: &'a dyn TemplateEngine,
    prompter: &'a dyn Prompter,
    process: &'a dyn ProcessRunner,
}

impl<'a> Engine<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        vcs: &'a dyn VersionControl,
        config_loader: &'a dyn TemplateConfigLoader,
        fs: &'a dyn Filesystem,
        engine: &'a dyn TemplateEngine,
        prompter: &'a dyn Prompter,
        process: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            vcs,
            config_loader,
            fs,
            engine,
            prompter,
            process,
        }
    }

    /// Render `template_ref` into `dst_root` from scratch (§4: Template
    /// Locator → Config Loader → Question Resolver → Render Pipeline → Task
    /// Runner, in that order).
    pub fn copy(
        &self,
        template_ref: &TemplateRef,
        dst_root: &Path,
        options: &CopyOptions,
    ) -> Result<Template, ApplicationError> {
        let was_existing = self.fs.exists(dst_root);
        let result = self.copy_inner(template_ref, dst_root, options);
        if result.is_err() && !was_existing && options.cleanup_on_error {
            let _ = self.fs.remove_dir_all(dst_root);
        }
        result
    }

    fn copy_inner(
        &self,
        template_ref: &TemplateRef,
        dst_root: &Path,
        options: &CopyOptions,
    ) -> Result<Template, ApplicationError> {
        let resolver = TemplateResolver::new(self.vcs, self.config_loader, self.fs);
        let template = resolver.resolve(template_ref)?;

        let answers_relpath = options
            .answers_file
            .clone()
            .map(RelativePath::try_new)
            .transpose()
            .map_err(|e| ApplicationError::TemplateResolutionFailed { reason: e.to_string() })?
            .unwrap_or_else(|| template.answers_relpath.clone());

        let subproject = Subproject::new(dst_root.to_path_buf(), answers_relpath.clone());
        let last_answers = load_last_answers(self.fs, &subproject);

        let mut answers = AnswersMap::new()
            .with_init(options.forced_answers.clone())
            .with_last(last_answers)
            .with_metadata(
                template
                    .metadata_entries()
                    .into_iter()
                    .collect::<BTreeMap<_, _>>(),
            );

        let folder_name = dst_root
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let question_resolver = QuestionResolver::new(self.engine, self.prompter);
        question_resolver.resolve(&template, &mut answers, options.ask_user, &folder_name)?;

        let ctx = RenderContext::new(answers.combined(), folder_name);

        self.fs.create_dir_all(dst_root)?;

        let render_options = RenderOptions {
            force: options.force,
            pretend: options.pretend,
            extra_exclude: options.extra_exclude.clone(),
            extra_skip_if_exists: options.extra_skip_if_exists.clone(),
        };
        let pipeline = RenderPipeline::new(self.fs, self.engine, self.prompter);
        pipeline.run(&template, dst_root, &ctx, &render_options)?;

        if !options.pretend {
            write_answers_file(
                self.fs,
                dst_root,
                &answers_relpath,
                &answers.persisted_entries(&template.secret_questions),
            )?;
        }

        let task_runner = TaskRunner::new(self.engine, self.process);
        let tasks_with_stage: Vec<_> = template
            .tasks
            .iter()
            .cloned()
            .map(|mut t| {
                t.extra_env.insert("STAGE".to_string(), "task".to_string());
                t
            })
            .collect();
        if !options.pretend {
            task_runner.run_all(&tasks_with_stage, dst_root, &ctx, &template.envops)?;
        }

        Ok(template)
    }

    /// Update a previously-copied `dst_root` to whatever revision
    /// `template_ref` resolves to, preserving user edits via a git-diff
    /// shadow render (the 10-step algorithm in §4.G).
    pub fn update(
        &self,
        dst_root: &Path,
        template_ref: &TemplateRef,
        options: &CopyOptions,
    ) -> Result<Template, ApplicationError> {
        if !self.vcs.is_clean(dst_root)? {
            return Err(ApplicationError::VcsOperationFailed {
                operation: "is_clean".to_string(),
                reason: crate::domain::DomainError::DirtyWorkingTree.to_string(),
            });
        }

        let answers_relpath = options
            .answers_file
            .clone()
            .map(RelativePath::try_new)
            .transpose()
            .map_err(|e| ApplicationError::TemplateResolutionFailed { reason: e.to_string() })?
            .unwrap_or_else(|| RelativePath::try_new(".copier-answers.yml").expect("static path"));

        let subproject = Subproject::new(dst_root.to_path_buf(), answers_relpath.clone());
        let last_answers = load_last_answers(self.fs, &subproject);
        let subproject = subproject.with_last_answers(last_answers.clone());

        let (old_url, old_ref) = subproject.template_ref_from_answers().ok_or_else(|| {
            ApplicationError::TemplateResolutionFailed {
                reason: crate::domain::DomainError::MissingTemplateReference.to_string(),
            }
        })?;

        let resolver = TemplateResolver::new(self.vcs, self.config_loader, self.fs);
        let new_template = resolver.resolve(template_ref)?;
        let new_commit = new_template
            .commit
            .clone()
            .ok_or_else(|| ApplicationError::TemplateResolutionFailed {
                reason: "updating is only supported for git-tracked templates".to_string(),
            })?;

        DomainValidator::validate_not_downgrade(&old_ref, &new_commit).map_err(|e| {
            ApplicationError::TemplateResolutionFailed { reason: e.to_string() }
        })?;

        // Step 1-3: shadow-render the OLD revision into a sibling temp tree.
        let shadow_root = dst_root.with_file_name(format!(
            "{}.templex-update-shadow",
            dst_root.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default()
        ));
        if self.fs.exists(&shadow_root) {
            self.fs.remove_dir_all(&shadow_root)?;
        }
        self.fs.create_dir_all(&shadow_root)?;
        let old_ref_obj = TemplateRef::new(old_url.clone()).with_ref(old_ref.clone());
        let shadow_options = CopyOptions {
            answers_file: options.answers_file.clone(),
            forced_answers: last_answers.clone(),
            force: true,
            quiet: true,
            ask_user: false,
            pretend: false,
            cleanup_on_error: false,
            ..Default::default()
        };
        self.copy(&old_ref_obj, &shadow_root, &shadow_options)?;

        // Step 4-6: turn the shadow tree into a git repo and diff it against
        // the real destination over a shallow fetch.
        self.vcs.init(&shadow_root)?;
        self.vcs.add_all(&shadow_root)?;
        self.vcs.set_config(&shadow_root, "user.name", "templex")?;
        self.vcs.set_config(&shadow_root, "user.email", "templex@localhost")?;
        self.vcs.commit(&shadow_root, "dumb commit 1", true)?;
        self.vcs.commit(&shadow_root, "dumb commit 2", true)?;
        self.vcs.add_remote(&shadow_root, "real_dst", &dst_root.display().to_string())?;
        self.vcs.fetch(&shadow_root, "real_dst", "HEAD", 1)?;

        let diff = match self.vcs.diff(&shadow_root, "HEAD...FETCH_HEAD", Some(-1)) {
            Ok(d) => d,
            Err(_) => self.vcs.diff(&shadow_root, "HEAD...FETCH_HEAD", Some(0))?,
        };
        let _ = self.fs.remove_dir_all(&shadow_root);

        // Step 7: pre-migration tasks.
        let old_version = parse_template_version(&old_ref);
        let new_version = parse_template_version(&new_commit);
        if let (Ok(from), Ok(to)) = (&old_version, &new_version) {
            self.run_migrations(&new_template, dst_root, &last_answers, from, to, MigrationStage::Before)?;
        }

        // Step 8: re-render the NEW revision straight into the destination.
        let mut new_options = options.clone();
        new_options.forced_answers = merge_forced(&options.forced_answers, &last_answers);
        new_options.cleanup_on_error = false;
        let template = self.copy(template_ref, dst_root, &new_options)?;

        // Step 9: apply the cached diff, excluding the answers file and any
        // skip-if-exists pattern.
        let mut excludes = vec![answers_relpath.to_string()];
        excludes.extend(template.skip_if_exists.iter().cloned());
        excludes.extend(options.extra_skip_if_exists.iter().cloned());
        let _hunks = self.vcs.apply(dst_root, &diff, &excludes)?;

        // Step 10: post-migration tasks.
        if let (Ok(from), Ok(to)) = (&old_version, &new_version) {
            self.run_migrations(&template, dst_root, &last_answers, from, to, MigrationStage::After)?;
        }

        Ok(template)
    }

    #[allow(clippy::too_many_arguments)]
    fn run_migrations(
        &self,
        template: &Template,
        dst_root: &Path,
        answers: &BTreeMap<String, Value>,
        from: &semver::Version,
        to: &semver::Version,
        stage: MigrationStage,
    ) -> Result<(), ApplicationError> {
        let ctx = RenderContext::new(answers.clone(), String::new());
        let task_runner = TaskRunner::new(self.engine, self.process);
        for (migration, matched_version) in template.migrations_for_range(from, to) {
            let tasks: Vec<_> = migration
                .tasks_for_stage(stage)
                .iter()
                .cloned()
                .map(|mut t| {
                    t.extra_env.insert("STAGE".to_string(), "migration".to_string());
                    t.extra_env
                        .insert("VERSION_CURRENT".to_string(), matched_version.to_string());
                    t.extra_env.insert("VERSION_FROM".to_string(), from.to_string());
                    t.extra_env.insert("VERSION_TO".to_string(), to.to_string());
                    t
                })
                .collect();
            task_runner.run_all(&tasks, dst_root, &ctx, &template.envops)?;
        }
        Ok(())
    }
}

fn merge_forced(
    forced: &BTreeMap<String, Value>,
    last: &BTreeMap<String, Value>,
) -> BTreeMap<String, Value> {
    let mut out = last.clone();
    out.extend(forced.clone());
    out
}

fn load_last_answers(fs: &dyn Filesystem, subproject: &Subproject) -> BTreeMap<String, Value> {
    let path = subproject.answers_abspath();
    let Ok(contents) = fs.read_to_string(&path) else {
        return BTreeMap::new();
    };
    let Ok(parsed) = serde_yaml::from_str::<serde_yaml::Value>(&contents) else {
        return BTreeMap::new();
    };
    match crate::application::value_convert::value_from_yaml(parsed) {
        Value::Map(entries) => entries
            .into_iter()
            .filter_map(|(k, v)| k.as_str().map(|s| (s.to_string(), v)))
            .collect(),
        _ => BTreeMap::new(),
    }
}

fn write_answers_file(
    fs: &dyn Filesystem,
    dst_root: &Path,
    answers_relpath: &RelativePath,
    entries: &[(String, Value)],
) -> Result<(), ApplicationError> {
    let map: Vec<(Value, Value)> = entries
        .iter()
        .map(|(k, v)| (Value::Str(k.clone()), v.clone()))
        .collect();
    let yaml = crate::application::value_convert::value_to_yaml(&Value::Map(map));
    let rendered = serde_yaml::to_string(&yaml).map_err(|e| ApplicationError::AnswersFileCorrupt {
        path: answers_relpath.to_string(),
        reason: e.to_string(),
    })?;
    let dst_abspath: PathBuf = dst_root.join(answers_relpath.as_path());
    fs.write_file(&dst_abspath, rendered.as_bytes())
}
