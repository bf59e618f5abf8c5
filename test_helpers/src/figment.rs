//! Jailed environments for `patch-maker` settings tests.
//!
//! Each jail starts from an empty environment in a fresh working directory,
//! so neither the caller's shell nor a stray `patch-maker.toml` reaches the
//! file or `PATCH_MAKER_*` layers.

use anyhow::{Result, anyhow};

/// Configuration file name the command looks up in its working directory.
pub const CONFIG_FILE: &str = "patch-maker.toml";

/// Runs `f` inside a [`figment::Jail`] with a cleared environment.
///
/// When `config` is given it is written to [`CONFIG_FILE`] in the jail
/// directory before `f` runs. The closure reports failures as
/// [`anyhow::Error`], so settings errors propagate with `?` unchanged.
///
/// # Errors
///
/// Returns an error when the jail or the configuration file cannot be set
/// up, or whatever `f` returns.
///
/// # Examples
///
/// ```
/// use patch_maker_test_helpers::figment::with_settings_jail;
///
/// let contents = with_settings_jail(Some("format = \"text\"\n"), |jail| {
///     jail.set_env("PATCH_MAKER_FORMAT", "json");
///     let file = std::fs::read_to_string("patch-maker.toml")?;
///     Ok((file, std::env::var("PATCH_MAKER_FORMAT")?))
/// })?;
/// assert_eq!(contents, ("format = \"text\"\n".to_owned(), "json".to_owned()));
/// # Ok::<_, anyhow::Error>(())
/// ```
pub fn with_settings_jail<F, T>(config: Option<&str>, f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        jail.clear_env();
        if let Some(contents) = config {
            jail.create_file(CONFIG_FILE, contents)?;
        }
        output = Some(f(jail));
        Ok(())
    })
    .map_err(|err| anyhow!("failed to prepare settings jail: {err}"))?;
    output.ok_or_else(|| anyhow!("settings jail closure did not run"))?
}
