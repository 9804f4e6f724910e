use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const EXPORT: &str = "url,username,password,httpRealm,formActionOrigin,guid,timeCreated,timeLastUsed,timePasswordChanged
chrome://FirefoxAccounts,,secret,Firefox Accounts credentials,,{g0},1,1,1
https://a.example.com,,hunter2222,,https://a.example.com,{g1},1,1,1
https://b.example.com,bob,,,https://b.example.com,{g2},1,1,1
https://different.example.com,carol,zzzz,,https://different.example.com,{g3},1,1,1
";

const CLEAN_EXPORT: &str = "url,username,password
https://mail.one.org,alice,correcthorse
https://two.net,bob,battery-staple
";

#[test]
fn e2e_writes_report_for_findings() {
    let tmp = tempdir().unwrap();
    let inbox = tmp.path().join("inbox");
    let out = tmp.path().join("out");
    fs::create_dir_all(&inbox).unwrap();
    fs::create_dir_all(&out).unwrap();
    fs::write(inbox.join("logins.csv"), EXPORT).unwrap();

    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.arg("--search-dir")
        .arg(&inbox)
        .arg("-o")
        .arg(&out)
        .arg("--color")
        .arg("never");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found 1 blank username(s):"))
        .stdout(predicate::str::contains("Password validation complete!"));

    let report = fs::read_to_string(out.join("LockwiseReport.txt")).unwrap();
    assert!(report.starts_with("-= Password Validation Report =-"));
    assert!(report.contains("Found 2 invalid password(s):"));
    assert!(report.contains("Found 1 potential duplicate site(s):"));
    assert!(report.contains("| example.com |     3 |"));
    assert!(!report.contains("FirefoxAccounts"));
}

#[test]
fn newest_export_across_dirs_is_used() {
    let tmp = tempdir().unwrap();
    let old_dir = tmp.path().join("old");
    let new_dir = tmp.path().join("new");
    fs::create_dir_all(&old_dir).unwrap();
    fs::create_dir_all(&new_dir).unwrap();
    let old = old_dir.join("logins.csv");
    fs::write(&old, EXPORT).unwrap();
    fs::File::options()
        .write(true)
        .open(&old)
        .unwrap()
        .set_modified(std::time::SystemTime::now() - std::time::Duration::from_secs(3600))
        .unwrap();
    fs::write(new_dir.join("logins-2024.csv"), CLEAN_EXPORT).unwrap();

    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.current_dir(tmp.path())
        .arg("--search-dir")
        .arg(&old_dir)
        .arg("--search-dir")
        .arg(&new_dir);
    cmd.assert().success();
    // the newer export is clean, so no report is produced
    assert!(!tmp.path().join("LockwiseReport.txt").exists());
}

#[test]
fn clean_export_writes_no_report() {
    let tmp = tempdir().unwrap();
    fs::write(tmp.path().join("my_logins.csv"), CLEAN_EXPORT).unwrap();
    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.arg("--search-dir")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Found").not());
    assert!(!tmp.path().join("LockwiseReport.txt").exists());
}

#[test]
fn missing_export_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.arg("--search-dir").arg(tmp.path());
    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("export found"));
}

#[test]
fn malformed_export_causes_non_zero_exit() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("logins.csv"),
        "url,username,password\nhttps://a.com,bob,pw12,extra\n",
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.arg("--search-dir")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path());
    cmd.assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("header has 3"));
    assert!(!tmp.path().join("LockwiseReport.txt").exists());
}

#[test]
fn short_rows_are_audited_with_empty_cells() {
    let tmp = tempdir().unwrap();
    fs::write(
        tmp.path().join("logins.csv"),
        "url,username,password\nhttps://a.example.com,bob\nhttps://b.example.com\n",
    )
    .unwrap();
    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.arg("--search-dir")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Loaded 2 login(s)"));
    let report = fs::read_to_string(tmp.path().join("LockwiseReport.txt")).unwrap();
    assert!(report.contains("Found 1 blank username(s):"));
    assert!(report.contains("Found 2 invalid password(s):"));
    assert!(report.contains("| example.com |     2 |"));
}

#[test]
fn csv_export_and_unparsed_exclusion() {
    let tmp = tempdir().unwrap();
    let data = "url,username,password\nnot a url,a,password1\nstill not,b,password2\nhttps://x.io,,password3\n";
    fs::write(tmp.path().join("logins.csv"), data).unwrap();

    let mut cmd = Command::cargo_bin("lockwise-audit").unwrap();
    cmd.arg("--search-dir")
        .arg(tmp.path())
        .arg("-o")
        .arg(tmp.path())
        .arg("--skip-unparsed-domains")
        .arg("--csv")
        .arg("-q");
    cmd.assert().success().stdout(predicate::str::is_empty());

    let report = fs::read_to_string(tmp.path().join("LockwiseReport.txt")).unwrap();
    assert!(report.contains("Found 1 blank username(s):"));
    assert!(!report.contains("duplicate"));

    let csvs: Vec<_> = fs::read_dir(tmp.path())
        .unwrap()
        .flatten()
        .filter(|e| {
            e.file_name()
                .to_string_lossy()
                .starts_with("lockwise_findings_")
        })
        .collect();
    assert_eq!(csvs.len(), 1);
}
