use std::process::Command;

use basedirs::os::env::ProcessEnv;
use basedirs::os::user::UserError;
use basedirs::xdg::{self, BaseDirs};

const CHILD: &str = "BASEDIRS_FATAL_INIT_CHILD";

#[test]
fn failed_identity_lookup_exits_with_status_1() {
    if std::env::var_os(CHILD).is_some() {
        let failed: Result<BaseDirs<ProcessEnv>, UserError> = Err(UserError::NotFound {
            uid: "4242".into(),
        });
        let _dirs = xdg::init_or_exit(failed);
        unreachable!("init_or_exit returned after a failed lookup");
    }

    let exe = std::env::current_exe().expect("test binary path");
    let output = Command::new(exe)
        .args(["--exact", "failed_identity_lookup_exits_with_status_1", "--nocapture"])
        .env(CHILD, "1")
        .output()
        .expect("spawn test binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no user entry for uid 4242"), "{stderr}");
}

#[test]
fn successful_lookup_is_passed_through() {
    let dirs = xdg::init_or_exit(BaseDirs::from_lookup(
        ProcessEnv,
        &basedirs::os::user::CurrentUser::new("/home/alice", Some("1000")),
    ));
    assert_eq!(dirs.user().uid.as_deref(), Some("1000"));
}
