use crate::constant::log::ERR_DB_SAVE_FAILURE;
use crate::db::db_data_proxy::DbDataProxy;
use dirs::home_dir;
use formatx::formatx;
use std::fs::create_dir_all;
use std::ops::Not;
use std::path::{Path, PathBuf};

pub mod db_data_proxy;
mod db_struct;

pub const DB_FILE_NAME: &str = ".gale-db.toml";

fn get_path_or_home_path(path: Option<&Path>) -> PathBuf {
    path.unwrap_or(&home_dir().unwrap_or_default())
        .to_path_buf()
}

pub fn get_default_db_file_path(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        Some(path.to_path_buf())
    } else if path.is_dir() {
        Some(path.join(DB_FILE_NAME))
    } else {
        None
    }
}

fn touch_default_db_file_path(path: &Path) -> PathBuf {
    if path.is_file() {
        return path.to_path_buf();
    } else if path.is_dir() {
        return path.join(DB_FILE_NAME);
    }

    let mut path = path.to_path_buf();
    if path.is_relative() {
        path = home_dir().unwrap_or_default().join(path)
    }

    if !path
        .file_name()
        .and_then(|item| item.to_str())
        .is_some_and(|n| n.ends_with(".toml"))
    {
        path = path.join(DB_FILE_NAME);
    }

    if let Some(p) = path.parent() {
        p.exists().not().then(|| create_dir_all(p).ok());
    }

    path
}

pub fn get_db(path: Option<&Path>) -> DbDataProxy {
    get_default_db_file_path(&get_path_or_home_path(path))
        .and_then(|item| DbDataProxy::get_from_path(&item))
        .unwrap_or_default()
}

pub fn save_with_error_log(db: &DbDataProxy, path: Option<&Path>) {
    let target = touch_default_db_file_path(&get_path_or_home_path(path));
    if let Err(e) = db.save(&target) {
        println!("{}", formatx!(ERR_DB_SAVE_FAILURE, e).unwrap_or_default());
    }
}

pub fn delete_db_file(path: Option<&Path>) {
    if let Some(p) = get_default_db_file_path(&get_path_or_home_path(path)) {
        let _ = p.is_file().then(|| std::fs::remove_file(p));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl PartialEq for DbDataProxy {
        fn eq(&self, other: &Self) -> bool {
            self.get_github_token() == other.get_github_token()
                && self.get_owner() == other.get_owner()
                && self.get_repo() == other.get_repo()
                && self.get_tail_lines() == other.get_tail_lines()
                && self.get_content_window_ceiling() == other.get_content_window_ceiling()
                && self.get_last_run_id() == other.get_last_run_id()
        }
    }

    #[test]
    fn test_get_db_not_exist() {
        let path = PathBuf::from("non_existent_path");
        let db = get_db(Some(&path));
        assert_eq!(db, DbDataProxy::default());
    }

    #[test]
    fn test_save() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();

        let mut db = DbDataProxy::default();

        db.set_github_token(Some("ghp_16c7e42f".to_string()));
        db.set_owner(Some("octo".to_string()));
        db.set_repo(Some("hello".to_string()));
        db.set_tail_lines(Some(300));
        db.set_content_window_ceiling(Some(2000));
        db.set_last_run_id(Some(29679449));

        db.save(temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();

        assert_eq!(
            content,
            r#"version = 2
github_token = "ghp_16c7e42f"
owner = "octo"
repo = "hello"
tail_lines = 300
content_window_ceiling = 2000
last_run_id = 29679449
"#
        );

        let loaded_db = DbDataProxy::get_from_path(temp_file.path()).unwrap();

        assert_eq!(loaded_db, db);
    }

    #[test]
    fn test_save_skips_unset_fields() {
        let temp_file = tempfile::NamedTempFile::new().unwrap();

        let mut db = DbDataProxy::default();
        db.set_owner(Some("octo".to_string()));

        db.save(temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();

        assert_eq!(
            content,
            r#"version = 2
owner = "octo"
"#
        );
    }

    #[test]
    fn test_get_old_file_upgrades() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();

        let content = r#"version = 1
github_token = "ghp_16c7e42f"
owner = "octo"
repo = "hello"
"#;

        file.write_all(content.to_string().as_bytes()).unwrap();
        file.flush().unwrap();

        let db = DbDataProxy::get_from_path(file.path());

        assert!(db.is_some());

        let db = db.unwrap();

        assert_eq!(db.get_github_token(), &Some("ghp_16c7e42f".to_string()));
        assert_eq!(db.get_owner(), &Some("octo".to_string()));
        assert_eq!(db.get_repo(), &Some("hello".to_string()));
        assert!(db.get_tail_lines().is_none());
        assert!(db.get_last_run_id().is_none());
    }

    #[test]
    fn test_delete_db_file() {
        let temp_dir = tempfile::tempdir().unwrap();

        let db = DbDataProxy::default();
        save_with_error_log(&db, Some(temp_dir.path()));

        let file_path = temp_dir.path().join(DB_FILE_NAME);
        assert!(file_path.is_file());

        delete_db_file(Some(temp_dir.path()));
        assert!(!file_path.exists());
    }
}
