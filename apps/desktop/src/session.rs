//! Line-oriented form session: command parsing and rendering.

use client_core::{FormController, FormPhase, FormSnapshot, Notice, NoticeKind};
use shared::domain::FormField;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const HELP: &str = "\
Perintah:
  name <nilai>       isi Nama Lengkap
  org <nilai>        isi Asal Instansi
  message <nilai>    isi Pesan (opsional)
  show               tampilkan isian saat ini
  submit             kirim data
  clear-notice       tutup pemberitahuan terakhir
  help               tampilkan bantuan ini
  quit               keluar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set(FormField, String),
    Show,
    Submit,
    ClearNotice,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim_start();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (line.trim_end(), ""),
    };

    match head.to_ascii_lowercase().as_str() {
        "" => Err("perintah kosong; ketik 'help'".to_string()),
        "show" => Ok(SessionCommand::Show),
        "submit" | "kirim" => Ok(SessionCommand::Submit),
        "clear-notice" => Ok(SessionCommand::ClearNotice),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => other
            .parse::<FormField>()
            .map(|field| SessionCommand::Set(field, rest.trim_end().to_string()))
            .map_err(|_| format!("perintah tidak dikenal: '{head}'; ketik 'help'")),
    }
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("[ok] {}", notice.message),
        NoticeKind::Error => format!("[gagal] {}", notice.message),
    }
}

pub fn render_snapshot(snapshot: &FormSnapshot) -> String {
    let mut out = String::new();
    for field in FormField::ALL {
        out.push_str(&format!(
            "{:<14}: {}\n",
            field.label(),
            snapshot.draft.get(field)
        ));
    }
    if snapshot.phase == FormPhase::Submitting {
        out.push_str("Mengirim...\n");
    }
    if let Some(notice) = &snapshot.notice {
        out.push_str(&render_notice(notice));
        out.push('\n');
    }
    out
}

/// Drives the controller from `input` until EOF or `quit`.
pub async fn run<R, W>(controller: &FormController, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    output.write_all(format!("{HELP}\n").as_bytes()).await?;

    loop {
        output.write_all(b"> ").await?;
        output.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = match parse_command(&line) {
            Ok(SessionCommand::Set(field, value)) => {
                controller.update_field(field, value).await;
                continue;
            }
            Ok(SessionCommand::Show) => render_snapshot(&controller.snapshot().await),
            Ok(SessionCommand::Submit) => {
                output.write_all(b"Mengirim...\n").await?;
                output.flush().await?;
                match controller.submit().await {
                    Ok(entry) => format!(
                        "{} (id={})\n",
                        render_notice(&Notice::success(client_core::SUCCESS_MESSAGE)),
                        entry.id
                    ),
                    Err(err) => format!("{}\n", render_notice(&Notice::error(err.notice_message()))),
                }
            }
            Ok(SessionCommand::ClearNotice) => {
                controller.dismiss_notice().await;
                continue;
            }
            Ok(SessionCommand::Help) => format!("{HELP}\n"),
            Ok(SessionCommand::Quit) => break,
            Err(message) => format!("{message}\n"),
        };
        output.write_all(reply.as_bytes()).await?;
    }

    output.flush().await
}
