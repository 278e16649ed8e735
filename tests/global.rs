use basedirs::os::env::ProcessEnv;
use basedirs::os::user::SystemUser;
use basedirs::xdg::{self, BaseDirs};
use claim::assert_ok;

#[test]
fn free_functions_match_fresh_resolver() {
    let fresh = assert_ok!(BaseDirs::from_lookup(ProcessEnv, &SystemUser));

    assert_eq!(xdg::data_home(), fresh.data_home());
    assert_eq!(xdg::config_home(), fresh.config_home());
    assert_eq!(xdg::data_dirs(), fresh.data_dirs());
    assert_eq!(xdg::config_dirs(), fresh.config_dirs());
    assert_eq!(xdg::cache_home(), fresh.cache_home());
    assert_eq!(xdg::runtime_dir(), fresh.runtime_dir());
    assert_eq!(xdg::state_home(), fresh.state_home());
}

#[test]
fn global_is_initialised_once() {
    assert!(std::ptr::eq(xdg::global(), xdg::global()));
    assert_eq!(xdg::global().user(), assert_ok!(BaseDirs::new()).user());
}
