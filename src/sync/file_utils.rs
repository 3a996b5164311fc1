use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::adapter::{FileRepository, GitExecutor};
use crate::model::ApplicationBundle;
use crate::reference::{build_reference, rehydrate};
use crate::storage::StorageResult;

/// Moves applications between bundles and their Git repositories.
///
/// Holds no state of its own; every call is independent. Collaborator
/// failures are returned unchanged and nothing is retried.
pub struct GitFileUtils<F, G> {
    files: F,
    git: G,
}

impl<F, G> GitFileUtils<F, G>
where
    F: FileRepository,
    G: GitExecutor,
{
    pub fn new(files: F, git: G) -> Self {
        Self { files, git }
    }

    pub fn files(&self) -> &F {
        &self.files
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Check out `branch` and write `bundle` to it.
    ///
    /// Returns the repository path. Datasource secrets are not written.
    pub fn save_application_to_local_repo(
        &self,
        repo_suffix: &Path,
        bundle: &ApplicationBundle,
        branch: &str,
    ) -> StorageResult<PathBuf> {
        self.git.checkout_to_branch(repo_suffix, branch)?;

        let reference = build_reference(bundle);
        let path = self.files.save_bundle(repo_suffix, &reference, branch)?;

        info!(
            repo = %repo_suffix.display(),
            branch,
            resources = reference.resource_count(),
            "saved application"
        );
        Ok(path)
    }

    /// Read `branch` of `<org_id>/<app_id>/<repo_name>` back into a bundle.
    ///
    /// Resource lists come back sorted by key, not in their original order.
    pub fn reconstruct_application_from_git_repo(
        &self,
        org_id: &str,
        app_id: &str,
        repo_name: &str,
        branch: &str,
    ) -> StorageResult<ApplicationBundle> {
        let reference = self.files.load_bundle(org_id, app_id, repo_name, branch)?;
        debug!(org_id, app_id, repo_name, branch, "loaded application reference");
        Ok(rehydrate(reference))
    }

    pub fn initialize_git_repo(&self, repo_suffix: &Path, view_url: &str, edit_url: &str) -> StorageResult<PathBuf> {
        self.files.initialize_repo(repo_suffix, view_url, edit_url)
    }

    pub fn detach_remote(&self, repo_suffix: &Path) -> StorageResult<bool> {
        self.files.detach_remote(repo_suffix)
    }

    pub fn check_if_directory_is_empty(&self, repo_suffix: &Path) -> StorageResult<bool> {
        self.files.is_directory_empty(repo_suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;

    use crate::model::{
        ActionDTO, Application, Datasource, DecryptedSensitiveFields, NewAction, NewPage, PageDTO,
    };
    use crate::reference::ApplicationReference;
    use crate::storage::{LocalGitStore, StorageError, StoreConfig};
    use tempfile::TempDir;

    /// Records calls and keeps the last saved reference in memory.
    #[derive(Default)]
    struct MemoryFiles {
        saved: RefCell<Option<ApplicationReference>>,
        calls: RefCell<Vec<String>>,
        fail_io: bool,
    }

    impl FileRepository for MemoryFiles {
        fn save_bundle(&self, repo_suffix: &Path, reference: &ApplicationReference, branch: &str) -> StorageResult<PathBuf> {
            self.calls.borrow_mut().push(format!("save:{branch}"));
            if self.fail_io {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only").into());
            }
            *self.saved.borrow_mut() = Some(reference.clone());
            Ok(repo_suffix.to_path_buf())
        }

        fn load_bundle(&self, _org_id: &str, _app_id: &str, _repo_name: &str, branch: &str) -> StorageResult<ApplicationReference> {
            self.calls.borrow_mut().push(format!("load:{branch}"));
            if self.fail_io {
                return Err(io::Error::new(io::ErrorKind::NotFound, "gone").into());
            }
            self.saved
                .borrow()
                .clone()
                .ok_or_else(|| StorageError::RefNotFound(branch.to_string()))
        }

        fn initialize_repo(&self, repo_suffix: &Path, _view_url: &str, _edit_url: &str) -> StorageResult<PathBuf> {
            Ok(repo_suffix.to_path_buf())
        }

        fn detach_remote(&self, _repo_suffix: &Path) -> StorageResult<bool> {
            Ok(self.saved.borrow_mut().take().is_some())
        }

        fn is_directory_empty(&self, _repo_suffix: &Path) -> StorageResult<bool> {
            Ok(self.saved.borrow().is_none())
        }
    }

    #[derive(Default)]
    struct RecordingGit {
        checkouts: RefCell<Vec<String>>,
        fail: bool,
    }

    impl GitExecutor for RecordingGit {
        fn checkout_to_branch(&self, _repo_suffix: &Path, branch: &str) -> StorageResult<()> {
            if self.fail {
                return Err(StorageError::RefNotFound(branch.to_string()));
            }
            self.checkouts.borrow_mut().push(branch.to_string());
            Ok(())
        }
    }

    fn page(id: &str, name: &str) -> NewPage {
        NewPage {
            id: Some(id.to_string()),
            unpublished_page: Some(PageDTO {
                name: Some(name.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn action(id: &str, name: &str, page_id: &str) -> NewAction {
        NewAction {
            id: Some(id.to_string()),
            unpublished_action: Some(ActionDTO {
                name: Some(name.to_string()),
                page_id: Some(page_id.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn bundle() -> ApplicationBundle {
        let mut bundle = ApplicationBundle::new(Application {
            id: Some("app1".to_string()),
            name: Some("CRM".to_string()),
            ..Default::default()
        });
        bundle.file_format_version = Some(1);
        bundle.unpublished_default_page_name = Some("Home".to_string());
        bundle.page_list = vec![page("p2", "Settings"), page("p1", "Home")];
        bundle.action_list = vec![action("a1", "getUsers", "p1")];
        bundle.datasource_list = vec![Datasource {
            id: Some("d1".to_string()),
            name: Some("users".to_string()),
            ..Default::default()
        }];
        bundle
    }

    #[test]
    fn test_save_checks_out_before_writing() {
        let utils = GitFileUtils::new(MemoryFiles::default(), RecordingGit::default());

        let path = utils
            .save_application_to_local_repo(Path::new("org/app/repo"), &bundle(), "feature")
            .unwrap();

        assert_eq!(path, Path::new("org/app/repo"));
        assert_eq!(*utils.git().checkouts.borrow(), vec!["feature".to_string()]);
        assert_eq!(*utils.files().calls.borrow(), vec!["save:feature".to_string()]);
    }

    #[test]
    fn test_checkout_failure_skips_write() {
        let git = RecordingGit {
            fail: true,
            ..Default::default()
        };
        let utils = GitFileUtils::new(MemoryFiles::default(), git);

        let err = utils
            .save_application_to_local_repo(Path::new("repo"), &bundle(), "feature")
            .unwrap_err();

        assert!(err.is_git());
        assert!(utils.files().calls.borrow().is_empty());
    }

    #[test]
    fn test_write_failure_propagates() {
        let files = MemoryFiles {
            fail_io: true,
            ..Default::default()
        };
        let utils = GitFileUtils::new(files, RecordingGit::default());

        let err = utils
            .save_application_to_local_repo(Path::new("repo"), &bundle(), "main")
            .unwrap_err();
        assert!(err.is_io());

        let err = utils
            .reconstruct_application_from_git_repo("org", "app", "repo", "main")
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_round_trip_through_adapters() {
        let utils = GitFileUtils::new(MemoryFiles::default(), RecordingGit::default());
        let original = bundle();

        utils
            .save_application_to_local_repo(Path::new("repo"), &original, "main")
            .unwrap();
        let restored = utils
            .reconstruct_application_from_git_repo("org", "app", "repo", "main")
            .unwrap();

        assert_eq!(restored.exported_application, original.exported_application);
        assert_eq!(restored.unpublished_default_page_name, Some("Home".to_string()));
        assert_eq!(restored.action_list, original.action_list);
        assert_eq!(restored.datasource_list, original.datasource_list);

        // Pages come back in key order.
        let names: Vec<_> = restored
            .page_list
            .iter()
            .map(|p| p.unpublished_page.as_ref().and_then(|d| d.name.clone()).unwrap())
            .collect();
        assert_eq!(names, vec!["Home".to_string(), "Settings".to_string()]);
    }

    #[test]
    fn test_secrets_are_not_saved() {
        let utils = GitFileUtils::new(MemoryFiles::default(), RecordingGit::default());
        let mut original = bundle();
        original.decrypted_fields = Some(
            [(
                "users".to_string(),
                DecryptedSensitiveFields {
                    password: Some("hunter2".to_string()),
                    ..Default::default()
                },
            )]
            .into_iter()
            .collect(),
        );

        utils
            .save_application_to_local_repo(Path::new("repo"), &original, "main")
            .unwrap();

        let saved = utils.files().saved.borrow().clone().unwrap();
        let written = serde_json::to_string(&saved).unwrap();
        assert!(!written.contains("hunter2"));
    }

    #[test]
    fn test_missing_branch_propagates() {
        let utils = GitFileUtils::new(MemoryFiles::default(), RecordingGit::default());
        let err = utils
            .reconstruct_application_from_git_repo("org", "app", "repo", "ghost")
            .unwrap_err();
        assert!(matches!(err, StorageError::RefNotFound(ref b) if b == "ghost"));
    }

    #[test]
    fn test_detach_and_empty_delegate() {
        let utils = GitFileUtils::new(MemoryFiles::default(), RecordingGit::default());
        assert!(utils.check_if_directory_is_empty(Path::new("repo")).unwrap());

        utils
            .save_application_to_local_repo(Path::new("repo"), &bundle(), "main")
            .unwrap();
        assert!(!utils.check_if_directory_is_empty(Path::new("repo")).unwrap());

        assert!(utils.detach_remote(Path::new("repo")).unwrap());
        assert!(!utils.detach_remote(Path::new("repo")).unwrap());
    }

    #[test]
    fn test_round_trip_through_local_store() {
        let dir = TempDir::new().unwrap();
        let store = LocalGitStore::new(StoreConfig::new(dir.path()));
        let utils = GitFileUtils::new(&store, &store);
        let suffix = Path::new("org").join("app").join("repo");

        utils
            .initialize_git_repo(&suffix, "https://x/view", "https://x/edit")
            .unwrap();
        utils
            .save_application_to_local_repo(&suffix, &bundle(), "main")
            .unwrap();

        let restored = utils
            .reconstruct_application_from_git_repo("org", "app", "repo", "main")
            .unwrap();
        assert_eq!(restored.page_list.len(), 2);
        assert_eq!(restored.action_list, bundle().action_list);
        assert_eq!(restored.file_format_version, Some(1));
        assert!(restored.decrypted_fields.is_none());

        assert!(utils.detach_remote(&suffix).unwrap());
    }
}
