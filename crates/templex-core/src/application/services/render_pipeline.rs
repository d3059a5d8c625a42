//! Render Pipeline (§4.E): walks a template's copy root, rendering paths and
//! contents into the destination, honoring exclude/skip patterns, conflict
//! resolution, and pretend mode.

use std::path::{Path, PathBuf};

use crate::application::ApplicationError;
use crate::application::ports::output::{Filesystem, Prompter, TemplateEngine};
use crate::domain::{RelativePath, RenderContext, Template};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderAction {
    Created,
    Identical,
    Overwritten,
    Skipped,
    Excluded,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub force: bool,
    pub pretend: bool,
    pub extra_exclude: Vec<String>,
    pub extra_skip_if_exists: Vec<String>,
}

/// A gitwildmatch-flavored pattern set, approximated with `glob::Pattern`
/// (no `!`-negation or directory-only `/` suffix support).
struct PatternSet(Vec<glob::Pattern>);

impl PatternSet {
    fn new(patterns: impl IntoIterator<Item = String>) -> Self {
        Self(
            patterns
                .into_iter()
                .filter_map(|p| glob::Pattern::new(&p).ok())
                .collect(),
        )
    }

    fn matches(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        let name_str = path.file_name().map(|n| n.to_string_lossy());
        self.0.iter().any(|p| {
            p.matches(&path_str) || name_str.as_deref().is_some_and(|n| p.matches(n))
        })
    }
}

pub struct RenderPipeline<'a> {
    fs: &'a dyn Filesystem,
    engine: &'a dyn TemplateEngine,
    prompter: &'a dyn Prompter,
}

impl<'a> RenderPipeline<'a> {
    pub fn new(fs: &'a dyn Filesystem, engine: &'a dyn TemplateEngine, prompter: &'a dyn Prompter) -> Self {
        Self { fs, engine, prompter }
    }

    /// Render every file/folder under `template`'s copy root into `dst_root`.
    pub fn run(
        &self,
        template: &Template,
        dst_root: &Path,
        ctx: &RenderContext,
        options: &RenderOptions,
    ) -> Result<Vec<(RelativePath, RenderAction)>, ApplicationError> {
        let exclude = PatternSet::new(
            template
                .exclude
                .iter()
                .cloned()
                .chain(options.extra_exclude.iter().cloned()),
        );
        let skip: Vec<String> = template
            .skip_if_exists
            .iter()
            .chain(options.extra_skip_if_exists.iter())
            .map(|p| self.engine.render_str(p, ctx, &template.envops))
            .collect::<Result<_, _>>()?;
        let skip = PatternSet::new(skip);

        let mut log = Vec::new();
        self.render_folder(
            template,
            &template.copy_root(),
            dst_root,
            ctx,
            options,
            &exclude,
            &skip,
            &mut log,
        )?;
        Ok(log)
    }

    #[allow(clippy::too_many_arguments)]
    fn render_folder(
        &self,
        template: &Template,
        src_abspath: &Path,
        dst_root: &Path,
        ctx: &RenderContext,
        options: &RenderOptions,
        exclude: &PatternSet,
        skip: &PatternSet,
        log: &mut Vec<(RelativePath, RenderAction)>,
    ) -> Result<(), ApplicationError> {
        let src_relpath = src_abspath
            .strip_prefix(template.copy_root())
            .unwrap_or(src_abspath);
        let Some(dst_relpath) = self.render_path(template, src_relpath, ctx)? else {
            return Ok(());
        };

        if !dst_relpath.as_os_str().is_empty() {
            let decision = self.render_allowed(template, dst_root, &dst_relpath, true, None, exclude, skip, options)?;
            if let Ok(rel) = RelativePath::try_new(dst_relpath.clone()) {
                log.push((rel, decision.clone()));
            }
            if matches!(decision, RenderAction::Excluded | RenderAction::Skipped) {
                return Ok(());
            }
            if !options.pretend {
                self.fs.create_dir_all(&dst_root.join(&dst_relpath))?;
            }
        }

        for child in self.fs.read_dir_sorted(src_abspath)? {
            if self.fs.is_dir(&child) {
                self.render_folder(template, &child, dst_root, ctx, options, exclude, skip, log)?;
            } else {
                self.render_file(template, &child, dst_root, ctx, options, exclude, skip, log)?;
            }
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn render_file(
        &self,
        template: &Template,
        src_abspath: &Path,
        dst_root: &Path,
        ctx: &RenderContext,
        options: &RenderOptions,
        exclude: &PatternSet,
        skip: &PatternSet,
        log: &mut Vec<(RelativePath, RenderAction)>,
    ) -> Result<(), ApplicationError> {
        let src_relpath = src_abspath
            .strip_prefix(template.copy_root())
            .unwrap_or(src_abspath);
        let Some(dst_relpath) = self.render_path(template, src_relpath, ctx)? else {
            return Ok(());
        };

        let is_template = src_abspath
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(&template.templates_suffix))
            .unwrap_or(false);

        let new_content = if is_template {
            let source = self.fs.read_to_string(src_abspath)?;
            self.engine
                .render_str(&source, ctx, &template.envops)?
                .into_bytes()
        } else {
            self.fs.read_file(src_abspath)?
        };

        let decision = self.render_allowed(
            template,
            dst_root,
            &dst_relpath,
            false,
            Some(&new_content),
            exclude,
            skip,
            options,
        )?;
        if let Ok(rel) = RelativePath::try_new(dst_relpath.clone()) {
            log.push((rel, decision.clone()));
        }

        if matches!(decision, RenderAction::Created | RenderAction::Overwritten) && !options.pretend {
            self.fs.write_file(&dst_root.join(&dst_relpath), &new_content)?;
        }
        Ok(())
    }

    /// Mirrors `_render_path`: rendered segment-by-segment, `None` when any
    /// segment renders empty or a templated sibling shadows this path.
    fn render_path(
        &self,
        template: &Template,
        relpath: &Path,
        ctx: &RenderContext,
    ) -> Result<Option<PathBuf>, ApplicationError> {
        if relpath.as_os_str().is_empty() {
            return Ok(Some(PathBuf::new()));
        }
        let is_template = relpath
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(&template.templates_suffix))
            .unwrap_or(false);

        let templated_sibling = template
            .local_abspath
            .join(format!("{}{}", relpath.display(), template.templates_suffix));
        if self.fs.exists(&templated_sibling) {
            return Ok(None);
        }

        let mut rendered_parts = Vec::new();
        for part in relpath.components() {
            let part_str = part.as_os_str().to_string_lossy();
            let rendered = self.engine.render_str(&part_str, ctx, &template.envops)?;
            if rendered.is_empty() {
                return Ok(None);
            }
            rendered_parts.push(rendered);
        }

        if is_template {
            if let Some(last) = rendered_parts.last_mut() {
                let suffix_len = template.templates_suffix.len();
                if last.len() >= suffix_len {
                    last.truncate(last.len() - suffix_len);
                }
            }
        }

        let result: PathBuf = rendered_parts.iter().collect();
        if !is_template {
            let sibling = template
                .local_abspath
                .join(format!("{}{}", result.display(), template.templates_suffix));
            if self.fs.exists(&sibling) {
                return Ok(None);
            }
        }
        Ok(Some(result))
    }

    #[allow(clippy::too_many_arguments)]
    fn render_allowed(
        &self,
        _template: &Template,
        dst_root: &Path,
        dst_relpath: &Path,
        is_dir: bool,
        expected_contents: Option<&[u8]>,
        exclude: &PatternSet,
        skip: &PatternSet,
        options: &RenderOptions,
    ) -> Result<RenderAction, ApplicationError> {
        if !dst_relpath.as_os_str().is_empty() && exclude.matches(dst_relpath) {
            return Ok(RenderAction::Excluded);
        }

        let dst_abspath = dst_root.join(dst_relpath);
        if !self.fs.exists(&dst_abspath) {
            return Ok(RenderAction::Created);
        }

        if is_dir {
            return Ok(RenderAction::Identical);
        }

        let previous = self.fs.read_file(&dst_abspath)?;
        if previous == expected_contents.unwrap_or(&[]) {
            return Ok(RenderAction::Identical);
        }

        if skip.matches(dst_relpath) {
            return Ok(RenderAction::Skipped);
        }
        if options.force {
            return Ok(RenderAction::Overwritten);
        }
        let overwrite = self
            .prompter
            .confirm(&format!("Overwrite {}?", dst_relpath.display()), true)?;
        Ok(if overwrite {
            RenderAction::Overwritten
        } else {
            RenderAction::Skipped
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_set_matches_glob() {
        let set = PatternSet::new(vec!["*.pyc".to_string()]);
        assert!(set.matches(Path::new("foo.pyc")));
        assert!(!set.matches(Path::new("foo.rs")));
    }
}
