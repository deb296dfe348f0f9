//! Embedded static assets for the wallet page.
//!
//! The page is self-contained: it connects to the injected wallet via
//! `window.ethereum`, executes queued provider calls, forwards wallet events
//! and the connect toggle to the bridge, and applies queued UI updates. Every
//! DOM update goes through an existence check so a trimmed-down page stays
//! functional.

pub(crate) mod contents {
    /// Single-page wallet UI. `{{SESSION_TOKEN}}` is replaced at serve time.
    pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Bellows</title>
  <style>
    body { font-family: ui-sans-serif, system-ui, sans-serif; max-width: 40rem; margin: 3rem auto; padding: 0 1rem; color: #1a1a1a; }
    button { padding: 0.5rem 1.25rem; font-size: 1rem; cursor: pointer; }
    button:disabled { cursor: not-allowed; opacity: 0.5; }
    section { border: 1px solid #ddd; border-radius: 6px; padding: 0.5rem 1rem; margin-top: 1rem; }
    h2 { font-size: 1rem; margin: 0.25rem 0; }
    p { margin: 0.5rem 0; overflow-wrap: anywhere; }
    .hidden { display: none; }
  </style>
</head>
<body>
  <main>
    <h1 id="pageTitle">Bellows wallet session</h1>
    <p id="status">Waiting for the bridge&hellip;</p>
    <button id="connectButton">Connect wallet</button>
    <section id="networkInfo" class="hidden">
      <h2>Network</h2>
      <p id="networkName"></p>
      <p id="networkId"></p>
    </section>
    <section id="accountInfo" class="hidden">
      <h2>Account</h2>
      <p id="accountAddress"></p>
      <p id="accountBalance"></p>
    </section>
  </main>
  <script>
    const TOKEN = "{{SESSION_TOKEN}}";
    const POLL_MS = 250;

    async function post(path, body) {
      const resp = await fetch(path, {
        method: "POST",
        headers: { "Content-Type": "application/json", "X-Session-Token": TOKEN },
        body: JSON.stringify(body),
      });
      return resp.json();
    }

    async function get(path) {
      const resp = await fetch(path, { headers: { "X-Session-Token": TOKEN } });
      return resp.json();
    }

    function setText(id, text) {
      const el = document.getElementById(id);
      if (el) el.textContent = text;
    }

    function setHidden(id, hidden) {
      const el = document.getElementById(id);
      if (el) el.classList.toggle("hidden", hidden);
    }

    function setButtonLabel(label) {
      const button = document.getElementById("connectButton");
      if (button) button.textContent = label;
    }

    function applyUpdate(update) {
      const data = update.data || {};
      switch (update.kind) {
        case "status":
          setText("status", data.message);
          break;
        case "connected":
          setHidden("pageTitle", true);
          setButtonLabel("Disconnect wallet");
          setText("status", "Connected: " + data.address);
          setText("accountAddress", data.address);
          break;
        case "disconnected":
          setHidden("pageTitle", false);
          setButtonLabel("Connect wallet");
          setText("status", "Disconnected");
          break;
        case "network":
          setText("networkName", data.name);
          setText("networkId", data.id);
          setHidden("networkInfo", false);
          break;
        case "balance":
          setText("accountBalance", data.value + " ETH");
          setHidden("accountInfo", false);
          break;
        case "hidePanels":
          setHidden("networkInfo", true);
          setHidden("accountInfo", true);
          break;
      }
    }

    async function execute(request) {
      try {
        const result = await window.ethereum.request({
          method: request.method,
          params: request.params || [],
        });
        await post("/api/response", { id: request.id, result: result, error: null });
      } catch (err) {
        await post("/api/response", {
          id: request.id,
          result: null,
          error: (err && err.message) || String(err),
        });
      }
    }

    async function pollRequests() {
      try {
        const resp = await get("/api/request");
        if (resp.success && resp.data) await execute(resp.data);
      } catch (err) {
        console.error("request poll failed:", err);
      }
      setTimeout(pollRequests, POLL_MS);
    }

    async function pollUi() {
      try {
        const resp = await get("/api/ui");
        if (resp.success && resp.data) resp.data.forEach(applyUpdate);
      } catch (err) {
        console.error("ui poll failed:", err);
      }
      setTimeout(pollUi, POLL_MS);
    }

    function init() {
      const installed = typeof window.ethereum !== "undefined";
      post("/api/hello", { installed: installed });

      const button = document.getElementById("connectButton");
      if (installed) {
        if (button) {
          button.addEventListener("click", () => post("/api/event", { event: "toggle" }));
        }
        window.ethereum.on("accountsChanged", (accounts) =>
          post("/api/event", { event: "accountsChanged", data: accounts }));
        window.ethereum.on("chainChanged", (chainId) =>
          post("/api/event", { event: "chainChanged", data: parseInt(chainId, 16) }));
        pollRequests();
      } else if (button) {
        button.disabled = true;
      }
      pollUi();
    }

    document.addEventListener("DOMContentLoaded", init);
  </script>
</body>
</html>
"##;
}
