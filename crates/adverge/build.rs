use std::fs;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::Shell;

// The command tree lives in src/cli.rs, which deliberately depends on
// nothing beyond clap and clap_complete so it can be included here.
#[path = "src/cli.rs"]
mod cli;

fn main() {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let out_dir = std::env::var_os("OUT_DIR").expect("OUT_DIR not set by Cargo");
    let out_dir = Path::new(&out_dir);

    let mut cmd = cli::Cli::command();
    cmd.build();

    write_completions(&mut cmd, &out_dir.join("completions"));
    write_manpages(&cmd, &out_dir.join("man"));
}

/// Pre-generate completion scripts for the shells we package.
fn write_completions(cmd: &mut clap::Command, dir: &Path) {
    fs::create_dir_all(dir).expect("failed to create completions directory");
    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        clap_complete::generate_to(shell, cmd, "adverge", dir)
            .unwrap_or_else(|e| panic!("failed to generate {shell} completions: {e}"));
    }
}

/// One man page per command, walking the tree iteratively. Subcommand
/// pages get dash-joined names ("adverge-cvr-apply.1").
fn write_manpages(root: &clap::Command, dir: &Path) {
    fs::create_dir_all(dir).expect("failed to create man output directory");

    let mut pending = vec![root.clone()];
    while let Some(cmd) = pending.pop() {
        let name = cmd.get_name().to_owned();
        for sub in cmd.get_subcommands().filter(|s| !s.is_hide_set()) {
            pending.push(sub.clone().name(format!("{name}-{}", sub.get_name())));
        }

        let mut page = Vec::new();
        clap_mangen::Man::new(cmd)
            .render(&mut page)
            .unwrap_or_else(|e| panic!("failed to render man page for `{name}`: {e}"));
        let path = dir.join(format!("{name}.1"));
        fs::write(&path, page)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
    }
}
