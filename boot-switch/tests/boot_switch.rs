use boot_switch::switch::{Outcome, Step};
use boot_switch::system::Privilege;
use boot_switch::test_utils::Fixture;
use boot_switch::Error;

const EFIBOOTMGR: &str = "\
BootCurrent: 0001
Timeout: 1 seconds
BootOrder: 0001,0003,0002
Boot0001* Ubuntu
Boot0003* Windows Boot Manager
Boot0002  UEFI: Built-in EFI Shell
";

const EFIBOOTMGR_NO_ORDER: &str = "\
BootCurrent: 0001
Boot0001* Ubuntu
Boot0003* Windows Boot Manager
";

const EFIBOOTMGR_NO_WINDOWS: &str = "\
BootCurrent: 0001
BootOrder: 0001,0002
Boot0001* Ubuntu
Boot0002  UEFI: Built-in EFI Shell
";

const EFIBOOTMGR_PENDING: &str = "\
BootCurrent: 0001
BootNext: 0003
BootOrder: 0001,0003
Boot0001* Ubuntu
Boot0003* Windows Boot Manager
";

const BCDEDIT_NO_LINUX: &str = r"
Firmware Boot Manager
---------------------
identifier              {fwbootmgr}
displayorder            {bootmgr}

Windows Boot Manager
--------------------
identifier              {bootmgr}
description             Windows Boot Manager
";

const BCDEDIT: &str = r"
Firmware Boot Manager
---------------------
identifier              {fwbootmgr}
displayorder            {bootmgr}
                        {abc}
timeout                 2

Windows Boot Manager
--------------------
identifier              {bootmgr}
description             Windows Boot Manager

Firmware Application (101fffff)
-------------------------------
identifier              {abc}
description             Ubuntu
";

#[test]
fn it_sets_one_time_boot_to_windows_and_reboots() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR)
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert!(matches!(run.outcome, Outcome::Done), "{:?}", run.outcome);
    assert_eq!(
        run.calls,
        [
            "sudo grep -i windows /boot/grub/grub.cfg",
            "efibootmgr",
            "sudo efibootmgr -n 0003",
            "sudo reboot",
        ]
    );
    assert!(run.printed("Successfully set next boot to Windows!"));
    assert_eq!(run.outcome.exit_code(), 0);
}

#[test]
fn it_moves_windows_to_front_in_persistent_mode() {
    let fx = Fixture::builder()
        .uefi(true)
        .privilege(Privilege::Root)
        .listing(EFIBOOTMGR)
        .build("linux");

    let run = fx.run("-y -p -v").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert_eq!(run.mutations(), ["efibootmgr -o 0003,0001,0002"]);
    assert_eq!(run.calls.last().map(String::as_str), Some("reboot"));
    assert!(run.printed("Current boot order: 0001,0003,0002"));
    assert!(run.printed("New boot order: 0003,0001,0002"));
    assert!(run.printed("permanently change your default boot order"));
}

#[test]
fn it_falls_back_to_one_time_without_boot_order() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR_NO_ORDER)
        .build("linux");

    let run = fx.run("-y -p").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert_eq!(run.mutations(), ["sudo efibootmgr -n 0003"]);
    assert!(run.printed("Falling back to one-time boot mode..."));
}

#[test]
fn it_guides_the_user_when_no_entry_matches() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR_NO_WINDOWS)
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::SelectTarget));
    assert!(matches!(
        run.outcome,
        Outcome::FailedAt {
            error: Error::EntryNotFound { .. },
            ..
        }
    ));
    assert!(run.mutations().is_empty());
    assert!(!run.calls.iter().any(|call| call.ends_with("reboot")));
    assert!(run.printed("Please run 'efibootmgr' to see available boot options."));
    assert_eq!(run.outcome.exit_code(), 0);
}

#[test]
fn it_does_nothing_when_the_user_declines() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR)
        .answer(false)
        .build("linux");

    let run = fx.run("").unwrap();
    assert!(matches!(run.outcome, Outcome::AbortedByUser));
    assert!(run.calls.is_empty());
    assert_eq!(run.console.prompts, ["Do you want to continue?"]);
    assert!(run.printed("Aborted."));
    assert_eq!(run.outcome.exit_code(), 0);
}

#[test]
fn it_asks_before_changing_anything() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR)
        .build("linux");

    let run = fx.run("-p").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert_eq!(run.console.prompts.len(), 1);
    assert!(run.printed("1. Set Windows as the DEFAULT boot entry (permanent change)"));
}

#[test]
fn it_rejects_unsupported_platforms() {
    let fx = Fixture::builder().build("macos");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::DetectPlatform));
    assert_eq!(run.outcome.exit_code(), 1);
    assert!(run.calls.is_empty());
}

#[test]
fn it_reports_enumeration_failures_without_mutating() {
    let fx = Fixture::builder()
        .uefi(true)
        .failing(vec!["efibootmgr"])
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::ListEntries));
    assert!(run.mutations().is_empty());
    assert!(run.printed("sudo apt install efibootmgr"));
    assert_eq!(run.outcome.exit_code(), 0);
}

#[test]
fn it_never_reboots_after_a_failed_mutation() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR)
        .failing(vec!["efibootmgr -n"])
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::Apply));
    assert!(!run.calls.iter().any(|call| call.ends_with("reboot")));
    assert!(run.printed("You may need to run: sudo efibootmgr -n 0003"));
}

#[test]
fn it_says_the_target_was_set_when_only_reboot_fails() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR)
        .failing(vec!["reboot"])
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::Reboot));
    assert_eq!(run.mutations(), ["sudo efibootmgr -n 0003"]);
    assert!(run.printed("The boot entry was set successfully"));
    assert!(run.printed("You can manually reboot with: sudo reboot"));
}

#[test]
fn it_uses_grub_reboot_on_legacy_bios() {
    let fx = Fixture::builder().build("linux");

    let run = fx.run("-y").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert_eq!(
        run.calls,
        [
            "sudo grep -i windows /boot/grub/grub.cfg",
            "sudo grub-reboot Windows",
            "sudo reboot",
        ]
    );
}

#[test]
fn it_gives_grub_instructions_when_legacy_fallback_fails() {
    let fx = Fixture::builder()
        .failing(vec!["grub-reboot", "grep"])
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::Apply));
    assert!(run.printed("Note: Could not automatically detect Windows entry."));
    assert!(run.printed("sudo grub-reboot <entry_name_or_number>"));
    assert!(!run.calls.iter().any(|call| call.ends_with("reboot")));
}

#[test]
fn it_sets_linux_boot_sequence_on_windows() {
    let fx = Fixture::builder()
        .privilege(Privilege::Root)
        .listing(BCDEDIT)
        .build("windows");

    let run = fx.run("-y").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert_eq!(
        run.calls,
        [
            "bcdedit /enum firmware",
            "bcdedit /set {fwbootmgr} bootsequence {abc}",
            "shutdown /r /t 0",
        ]
    );
    assert!(run.printed("Successfully set next boot to Linux!"));
}

#[test]
fn it_puts_linux_first_in_display_order_on_windows() {
    let fx = Fixture::builder()
        .privilege(Privilege::Root)
        .listing(BCDEDIT)
        .build("windows");

    let run = fx.run("-y --persist").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert_eq!(
        run.mutations(),
        ["bcdedit /set {fwbootmgr} displayorder {abc} /addfirst"]
    );
    assert!(!run.printed("Falling back"));
    assert!(run.printed("Successfully set Linux as default boot entry!"));
}

#[test]
fn it_warns_about_ambiguous_entries() {
    let listing = format!("{EFIBOOTMGR}Boot0004* Windows Recovery\n");
    let fx = Fixture::builder()
        .uefi(true)
        .listing(listing)
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.mutations(), ["sudo efibootmgr -n 0003"]);
    assert!(run.printed("0004 Windows Recovery also looks like Windows"));
}

#[test]
fn it_shows_the_raw_listing_and_pending_boot_when_verbose() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR_PENDING)
        .build("linux");

    let run = fx.run("-y -v").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert!(run.printed("Current boot configuration:"));
    assert!(run.printed("Boot0003* Windows Boot Manager"));
    assert!(run.printed("Current boot entry: 0001"));
    assert!(run.printed("Pending next boot entry: 0003"));
    assert!(run.printed("Current boot order: 0001,0003"));
}

#[test]
fn it_keeps_the_listing_to_itself_without_verbose() {
    let fx = Fixture::builder()
        .uefi(true)
        .listing(EFIBOOTMGR_PENDING)
        .build("linux");

    let run = fx.run("-y").unwrap();
    assert!(matches!(run.outcome, Outcome::Done));
    assert!(!run.printed("Current boot configuration:"));
    assert!(!run.printed("Pending next boot entry"));
}

#[test]
fn it_asks_for_administrator_when_bcdedit_listing_fails() {
    let fx = Fixture::builder()
        .privilege(Privilege::Root)
        .failing(vec!["bcdedit /enum"])
        .build("windows");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::ListEntries));
    assert!(matches!(
        run.outcome,
        Outcome::FailedAt {
            error: Error::EnumerationFailed { .. },
            ..
        }
    ));
    assert_eq!(run.calls, ["bcdedit /enum firmware"]);
    assert!(run.printed("Error: "));
    assert!(run.printed("Make sure you're running as Administrator."));
    assert_eq!(run.outcome.exit_code(), 0);
}

#[test]
fn it_points_to_bcdedit_when_no_linux_entry_exists() {
    let fx = Fixture::builder()
        .privilege(Privilege::Root)
        .listing(BCDEDIT_NO_LINUX)
        .build("windows");

    let run = fx.run("-y").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::SelectTarget));
    assert!(matches!(
        run.outcome,
        Outcome::FailedAt {
            error: Error::EntryNotFound { .. },
            ..
        }
    ));
    assert_eq!(run.calls, ["bcdedit /enum firmware"]);
    assert!(run.mutations().is_empty());
    assert!(run.printed("Please run 'bcdedit /enum firmware' to see available boot options."));
}

#[test]
fn it_names_shutdown_when_the_windows_reboot_fails() {
    let fx = Fixture::builder()
        .privilege(Privilege::Root)
        .listing(BCDEDIT)
        .failing(vec!["shutdown"])
        .build("windows");

    let run = fx.run("-y -p -v").unwrap();
    assert_eq!(run.outcome.failed_step(), Some(Step::Reboot));
    assert_eq!(
        run.mutations(),
        ["bcdedit /set {fwbootmgr} displayorder {abc} /addfirst"]
    );
    assert!(run.printed("Successfully set Linux as default boot entry!"));
    assert!(run.printed("The boot entry was set successfully"));
    assert!(run.printed("You can manually reboot with: shutdown /r /t 0"));
}
