use std::{env, path::PathBuf, sync::OnceLock};
use tokio::{fs::{create_dir_all, read_to_string, File}, io::AsyncWriteExt, sync::Mutex};
use serde::{Deserialize, Serialize};
use clap::Parser;
use crate::{error::Error, tools::log::{log_info, LogServiceType}, Result};


static CONFIG: OnceLock<Mutex<ServerConfig>> = OnceLock::new();
static ARGS: OnceLock<Args> = OnceLock::new();


const ENV_PORT: &str = "RATINGS_PORT";
const ENV_HOST: &str = "RATINGS_HOST";
const ENV_DIR: &str = "RATINGS_DIR";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "127.0.0.1";
const DOCKER_HOST: &str = "0.0.0.0";

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder holding config.json and the database
    #[arg(short, long)]
    dir: Option<String>,

    #[arg(short, long)]
    port: Option<u16>,

    /// Use /config as server folder
    #[arg(short = 'k', long)]
    docker: bool,
}

fn args() -> Args {
    ARGS.get().cloned().unwrap_or_default()
}

pub async fn initialize_config(args: Args) -> Result<ServerConfig> {
    let _ = ARGS.set(args);
    let local_path = get_server_local_path().await?;
    log_info(LogServiceType::Register, format!("LocalPath: {:?}", local_path));
    let config = get_raw_config().await?;
    let _ = CONFIG.set(Mutex::new(config.clone()));
    Ok(config)
}

pub async fn get_server_local_path() -> Result<PathBuf> {
    let args = args();

    let dir_path = if let Some(argdir) = args.dir {
        PathBuf::from(&argdir)
    } else if let Ok(val) = env::var(ENV_DIR) {
        PathBuf::from(&val)
    } else if args.docker {
        PathBuf::from("/config")
    } else {
        let Some(mut dir_path) = dirs::config_local_dir() else { return Err(Error::ServerUnableToAccessServerLocalFolder); };
        dir_path.push("star-ratings");
        dir_path
    };

    let Ok(_) = create_dir_all(&dir_path).await else { return Err(Error::ServerUnableToAccessServerLocalFolder); };

    Ok(dir_path)
}

pub async fn get_server_port() -> Result<u16> {
    if let Some(port) = args().port {
        return Ok(port);
    }
    if let Some(port) = env::var(ENV_PORT).ok().and_then(|p| p.parse::<u16>().ok()) {
        return Ok(port);
    }
    Ok(get_config().await?.port.unwrap_or(DEFAULT_PORT))
}

pub async fn get_server_host() -> Result<String> {
    if let Ok(host) = env::var(ENV_HOST) {
        return Ok(host);
    }
    Ok(get_config().await?.host.unwrap_or_else(|| default_host(args().docker).to_owned()))
}

/// Inside a container the published port only reaches an unspecified bind.
fn default_host(docker: bool) -> &'static str {
    if docker { DOCKER_HOST } else { DEFAULT_HOST }
}

pub async fn get_config() -> Result<ServerConfig> {
    if let Some(config) = CONFIG.get() {
        let guard = config.lock().await;
        Ok(guard.clone())
    } else {
        let config = get_raw_config().await?;
        let _ = CONFIG.set(Mutex::new(config.clone()));
        Ok(config)
    }
}

pub async fn get_raw_config() -> Result<ServerConfig> {
    let mut dir_path: PathBuf = get_server_local_path().await?;
    dir_path.push("config.json");

    if let Ok(data) = read_to_string(&dir_path).await {
        let Ok(config) = serde_json::from_str::<ServerConfig>(&data) else { return Err(Error::ServerMalformatedConfigFile); };
        Ok(config)
    } else {
        let new_config = ServerConfig::default();
        let new_config_string = serde_json::to_string(&new_config)?;

        let Ok(mut file) = File::create(&dir_path).await else { return Err(Error::ServerUnableToAccessServerLocalFolder); };
        file.write_all(new_config_string.as_bytes()).await?;
        log_info(LogServiceType::Register, format!("Created default config: {:?}", dir_path));
        Ok(new_config)
    }
}

pub async fn get_server_file_path_array(mut names: Vec<&str>) -> Result<PathBuf> {
    let mut dir_path: PathBuf = get_server_local_path().await?;
    if let Some(last) = names.pop() {
        for name in names {
            dir_path.push(name);
        }
        create_dir_all(&dir_path).await?;
        dir_path.push(last);
    }
    Ok(dir_path)
}
