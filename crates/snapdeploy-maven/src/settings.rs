//! Generated Maven `settings.xml` carrying the repository credentials.
//!
//! The document holds a single `<server>` entry whose `<id>` matches the
//! `-DrepositoryId` passed to the deploy tool:
//!
//! ```xml
//! <settings>
//!   <servers>
//!     <server>
//!       <id>snapshot-repo-id</id>
//!       <username>...</username>
//!       <password>...</password>
//!     </server>
//!   </servers>
//! </settings>
//! ```

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use snapdeploy_core::config::Credentials;
use snapdeploy_util::errors::DeployError;

/// File name of the generated settings document.
pub const SETTINGS_FILE_NAME: &str = "settings.xml";

/// A `<server>` entry read back from a settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEntry {
    pub id: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

fn xml_error(e: impl std::fmt::Display) -> DeployError {
    DeployError::Generic {
        message: format!("Failed to write settings.xml: {e}"),
    }
}

fn write_start(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), DeployError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)
}

fn write_end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), DeployError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)
}

fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    value: &str,
) -> Result<(), DeployError> {
    write_start(writer, name)?;
    writer
        .write_event(Event::Text(BytesText::new(value)))
        .map_err(xml_error)?;
    write_end(writer, name)
}

/// Render the settings document for `credentials` bound to `server_id`.
///
/// Text content is XML-escaped, so passwords containing `<` or `&` survive.
pub fn render_settings(credentials: &Credentials, server_id: &str) -> Result<String, DeployError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(xml_error)?;
    write_start(&mut writer, "settings")?;
    write_start(&mut writer, "servers")?;
    write_start(&mut writer, "server")?;
    write_text_element(&mut writer, "id", server_id)?;
    write_text_element(&mut writer, "username", &credentials.username)?;
    write_text_element(&mut writer, "password", &credentials.password)?;
    write_end(&mut writer, "server")?;
    write_end(&mut writer, "servers")?;
    write_end(&mut writer, "settings")?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    xml.push('\n');
    Ok(xml)
}

/// Write the settings document to `target`.
///
/// The file is created exclusively: if anything already exists at `target`
/// this fails with [`DeployError::CreationConflict`] and leaves it untouched.
pub fn generate_settings(
    target: &Path,
    credentials: &Credentials,
    server_id: &str,
) -> miette::Result<()> {
    let xml = render_settings(credentials, server_id)?;

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            DeployError::CreationConflict {
                path: target.to_path_buf(),
            }
        } else {
            DeployError::Io(e)
        }
    })?;
    file.write_all(xml.as_bytes()).map_err(DeployError::Io)?;

    tracing::debug!(
        "Wrote settings for server '{server_id}' to {}",
        target.display()
    );
    Ok(())
}

/// Parse the `<server>` entries of a settings document.
///
/// Not used on the deploy path; it lets callers and tests check what
/// [`generate_settings`] wrote.
pub fn read_server_entries(xml: &str) -> miette::Result<Vec<ServerEntry>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut servers = Vec::new();
    let mut current: Option<ServerEntry> = None;
    let mut path: Vec<String> = Vec::new();
    let mut text_buf = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                path.push(String::from_utf8_lossy(e.name().as_ref()).to_string());
                if path.join(">") == "settings>servers>server" {
                    current = Some(ServerEntry::default());
                }
                text_buf.clear();
            }
            Ok(Event::Text(ref e)) => {
                text_buf = e.unescape().unwrap_or_default().to_string();
            }
            Ok(Event::End(_)) => {
                let ctx = path.join(">");

                if let Some(ref mut server) = current {
                    match ctx.as_str() {
                        "settings>servers>server>id" => server.id = Some(text_buf.clone()),
                        "settings>servers>server>username" => {
                            server.username = Some(text_buf.clone());
                        }
                        "settings>servers>server>password" => {
                            server.password = Some(text_buf.clone());
                        }
                        _ => {}
                    }
                }
                if ctx == "settings>servers>server" {
                    if let Some(server) = current.take() {
                        servers.push(server);
                    }
                }

                path.pop();
                text_buf.clear();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DeployError::Generic {
                    message: format!("Failed to parse settings.xml: {e}"),
                }
                .into());
            }
            _ => {}
        }
    }

    Ok(servers)
}
