use assert_cmd::Command;

pub fn starmark_cmd() -> Command {
    let mut cmd = Command::cargo_bin("starmark").unwrap();
    cmd.env_remove("STARMARK_ROOT");
    cmd
}
