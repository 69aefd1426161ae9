//! Playwright browser automation over a Node bridge
//!
//! One persistent `node` child process runs an embedded driver script;
//! commands travel as JSON lines on stdin and replies come back on stdout.
//! The session owns a single browser context and page for the lifetime of
//! one test.

use std::process::{Command, Stdio};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command as TokioCommand};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use demobank_common::{Error, Result, SuiteConfig};

use crate::driver::Page;

/// JSON-line driver executed by node; speaks `{id, cmd, args}` requests and
/// `{id, ok, value|error}` replies.
const DRIVER_SCRIPT: &str = r#"
const readline = require('readline');
const { chromium } = require('playwright');

(async () => {
  let browser = null, page = null, baseUrl = '', timeoutMs = 15000;
  const rl = readline.createInterface({ input: process.stdin, terminal: false });
  const reply = (obj) => process.stdout.write(JSON.stringify(obj) + '\n');

  for await (const line of rl) {
    let msg;
    try { msg = JSON.parse(line); } catch (e) { reply({ id: -1, ok: false, error: 'bad request: ' + e.message }); continue; }
    const { id, cmd } = msg;
    const args = msg.args || {};
    try {
      let value = null;
      switch (cmd) {
        case 'init': {
          baseUrl = args.baseUrl;
          timeoutMs = args.timeoutMs || timeoutMs;
          browser = await chromium.launch({ headless: args.headless !== false });
          const context = await browser.newContext({
            viewport: { width: args.width, height: args.height }
          });
          page = await context.newPage();
          page.setDefaultTimeout(timeoutMs);
          break;
        }
        case 'goto': await page.goto(baseUrl + args.path); break;
        case 'click': await page.click(args.selector); break;
        case 'fill': await page.fill(args.selector, args.value); break;
        case 'select': await page.selectOption(args.selector, args.value); break;
        case 'inner_text': value = await page.innerText(args.selector); break;
        case 'input_value': value = await page.inputValue(args.selector); break;
        case 'wait_for': await page.waitForSelector(args.selector, { state: 'visible' }); break;
        case 'is_visible': value = await page.isVisible(args.selector); break;
        case 'url': value = page.url(); break;
        case 'close':
          if (browser) await browser.close();
          reply({ id, ok: true, value: null });
          process.exit(0);
        default: throw new Error('unknown command: ' + cmd);
      }
      reply({ id, ok: true, value });
    } catch (e) {
      reply({ id, ok: false, error: e.message });
    }
  }
})();
"#;

/// Browser session configuration
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Per-command deadline, including element waits
    pub timeout: Duration,
}

impl PlaywrightConfig {
    pub fn from_suite(config: &SuiteConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            headless: config.headless,
            viewport_width: config.viewport_width,
            viewport_height: config.viewport_height,
            timeout: config.nav_timeout,
        }
    }
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080/demobank".to_string(),
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            timeout: Duration::from_secs(15),
        }
    }
}

struct Bridge {
    child: Child,
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

/// A live Playwright-driven page
pub struct PlaywrightSession {
    bridge: Mutex<Bridge>,
    timeout: Duration,
    // Holds the driver script on disk for the child's lifetime.
    _workdir: tempfile::TempDir,
}

impl PlaywrightSession {
    /// Verify the Playwright installation, spawn the node bridge, and open a
    /// browser page pointed at the configured base URL.
    pub async fn launch(config: PlaywrightConfig) -> Result<Self> {
        Self::check_playwright_installed()?;

        let workdir = tempfile::tempdir()?;
        let script_path = workdir.path().join("driver.js");
        std::fs::write(&script_path, DRIVER_SCRIPT)?;

        info!(base_url = %config.base_url, "launching browser session");
        let mut child = TokioCommand::new("node")
            .arg(&script_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Driver(format!("failed to spawn node: {e}")))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Driver("driver stdin unavailable".into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Driver("driver stdout unavailable".into()))?;

        let session = Self {
            bridge: Mutex::new(Bridge {
                child,
                stdin,
                stdout: BufReader::new(stdout).lines(),
                next_id: 0,
            }),
            timeout: config.timeout,
            _workdir: workdir,
        };

        session
            .command(
                "init",
                json!({
                    "baseUrl": config.base_url,
                    "headless": config.headless,
                    "width": config.viewport_width,
                    "height": config.viewport_height,
                    "timeoutMs": config.timeout.as_millis() as u64,
                }),
            )
            .await?;
        Ok(session)
    }

    fn check_playwright_installed() -> Result<()> {
        let status = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => Ok(()),
            _ => Err(Error::PlaywrightNotFound),
        }
    }

    /// Send one command and wait for its reply.
    async fn command(&self, cmd: &str, args: Value) -> Result<Value> {
        let mut bridge = self.bridge.lock().await;
        bridge.next_id += 1;
        let id = bridge.next_id;

        let request = json!({ "id": id, "cmd": cmd, "args": args });
        debug!(%cmd, id, "driver command");

        let mut line = serde_json::to_vec(&request)?;
        line.push(b'\n');
        bridge
            .stdin
            .write_all(&line)
            .await
            .map_err(|e| Error::Driver(format!("driver write failed: {e}")))?;
        bridge
            .stdin
            .flush()
            .await
            .map_err(|e| Error::Driver(format!("driver flush failed: {e}")))?;

        // Commands are strictly sequential, but give the browser slack over
        // its own command deadline before declaring the bridge dead.
        let deadline = self.timeout + Duration::from_secs(5);
        loop {
            let next = tokio::time::timeout(deadline, bridge.stdout.next_line())
                .await
                .map_err(|_| Error::Driver(format!("driver timed out on `{cmd}`")))?
                .map_err(|e| Error::Driver(format!("driver read failed: {e}")))?;
            let Some(text) = next else {
                return Err(Error::Driver("driver exited unexpectedly".into()));
            };

            let reply: Value = match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(_) => {
                    warn!(line = %text, "ignoring non-JSON driver output");
                    continue;
                }
            };
            if reply["id"].as_u64() != Some(id) {
                continue;
            }
            if reply["ok"].as_bool() == Some(true) {
                return Ok(reply["value"].clone());
            }
            let message = reply["error"].as_str().unwrap_or("unknown driver error");
            return Err(Error::Page(format!("{cmd}: {message}")));
        }
    }

    fn text_arg(value: Value) -> String {
        value.as_str().map(str::to_string).unwrap_or_default()
    }
}

#[async_trait]
impl Page for PlaywrightSession {
    async fn goto(&self, path: &str) -> Result<()> {
        self.command("goto", json!({ "path": path })).await?;
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<()> {
        self.command("click", json!({ "selector": selector })).await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> Result<()> {
        self.command("fill", json!({ "selector": selector, "value": value }))
            .await?;
        Ok(())
    }

    async fn select(&self, selector: &str, value: &str) -> Result<()> {
        self.command("select", json!({ "selector": selector, "value": value }))
            .await?;
        Ok(())
    }

    async fn inner_text(&self, selector: &str) -> Result<String> {
        self.command("wait_for", json!({ "selector": selector })).await?;
        let value = self
            .command("inner_text", json!({ "selector": selector }))
            .await?;
        Ok(Self::text_arg(value).trim().to_string())
    }

    async fn input_value(&self, selector: &str) -> Result<String> {
        let value = self
            .command("input_value", json!({ "selector": selector }))
            .await?;
        Ok(Self::text_arg(value))
    }

    async fn wait_for(&self, selector: &str) -> Result<()> {
        self.command("wait_for", json!({ "selector": selector })).await?;
        Ok(())
    }

    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let value = self
            .command("is_visible", json!({ "selector": selector }))
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn url(&self) -> Result<String> {
        let value = self.command("url", json!({})).await?;
        Ok(Self::text_arg(value))
    }

    async fn close(&self) -> Result<()> {
        // Best effort: the driver exits on `close`; a dead bridge is fine here.
        match self.command("close", json!({})).await {
            Ok(_) | Err(Error::Driver(_)) => {}
            Err(e) => return Err(e),
        }
        let mut bridge = self.bridge.lock().await;
        let _ = bridge.child.wait().await;
        Ok(())
    }
}
