//! AppleScript and PowerShell snippets run by the system adapters

use std::path::Path;

/// Seconds to wait after activating the IDE before typing.
const ACTIVATE_DELAY_SECS: &str = "0.5";

/// Quote `value` as an AppleScript string literal.
pub fn applescript_string(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

/// Quote `value` as a PowerShell single-quoted string literal.
pub fn powershell_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Activate the IDE, open `file` through "Go to File" and jump to `line`.
pub fn open_file_at_line_script(app: &Path, process: &str, file: &Path, line: u32) -> String {
    format!(
        r#"tell application {app}
  activate
  delay {delay}
  tell application "System Events"
    tell process {process}
      keystroke "o" using {{command down, shift down}}
      delay {delay}
      keystroke {file}
      keystroke return
      delay {delay}
      keystroke "l" using {{command down}}
      keystroke "{line}"
      keystroke return
    end tell
  end tell
end tell"#,
        app = applescript_string(&app.to_string_lossy()),
        process = applescript_string(process),
        file = applescript_string(&file.to_string_lossy()),
        line = line,
        delay = ACTIVATE_DELAY_SECS,
    )
}

/// Activate the IDE and jump to `line` in the focused editor.
pub fn go_to_line_script(app: &Path, line: u32) -> String {
    format!(
        r#"tell application {app}
  activate
  tell application "System Events"
    keystroke "l" using {{command down}}
    keystroke "{line}"
    keystroke return
  end tell
end tell"#,
        app = applescript_string(&app.to_string_lossy()),
        line = line,
    )
}

/// List window titles of every process whose name contains `marker`, one
/// per line.
pub fn window_titles_script(marker: &str) -> String {
    format!(
        r#"set titleList to {{}}
tell application "System Events"
  repeat with proc in (every application process whose name contains {marker})
    repeat with win in (every window of proc)
      try
        set end of titleList to (name of win as text)
      end try
    end repeat
  end repeat
end tell
set AppleScript's text item delimiters to linefeed
return titleList as text"#,
        marker = applescript_string(marker),
    )
}

/// Print main window titles of IDE processes, one per line.
pub fn windows_titles_command(window_marker: &str, process_marker: &str) -> String {
    format!(
        "Get-Process | Where-Object {{ $_.MainWindowTitle -and ($_.MainWindowTitle -like {title} -or $_.Name -like {name}) }} | ForEach-Object {{ $_.MainWindowTitle }}",
        title = powershell_string(&format!("*{}*", window_marker)),
        name = powershell_string(&format!("*{}*", process_marker)),
    )
}

/// Print the default value of `key`.
pub fn registry_default_value_command(key: &str) -> String {
    format!(
        "Get-ItemProperty -Path {} -Name '(Default)' | Select-Object -ExpandProperty '(Default)'",
        powershell_string(key)
    )
}
