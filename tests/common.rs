use std::{env, fs, path::Path, sync::Once};

static START: Once = Once::new();

/// Set cwd to tests directory to be able to load descriptor fixtures
///
/// The tests/apps directory provides a couple of fake applications.
pub fn setup() {
    START.call_once(|| {
        let pwd = env::current_dir().unwrap();
        let pth = fs::canonicalize(Path::new(&pwd).join("tests")).unwrap();
        println!("Initializing tests - using testdir {}", pth.display());
        assert!(env::set_current_dir(pth).is_ok());
    });
}
