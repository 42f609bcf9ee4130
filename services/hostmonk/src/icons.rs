//! Icon lookup for popular self-hosted applications

pub const DEFAULT_ICON_PATH: &str = "/icons/default.svg";

static ICONS: &[(&str, &str)] = &[
    // media servers
    ("jellyfin", "/icons/jellyfin.svg"),
    ("plex", "/icons/plex.svg"),
    ("emby", "/icons/emby.svg"),
    ("navidrome", "/icons/navidrome.svg"),
    ("airsonic", "/icons/airsonic.svg"),
    // *arr suite
    ("sonarr", "/icons/sonarr.svg"),
    ("radarr", "/icons/radarr.svg"),
    ("lidarr", "/icons/lidarr.svg"),
    ("prowlarr", "/icons/prowlarr.svg"),
    ("bazarr", "/icons/bazarr.svg"),
    ("readarr", "/icons/readarr.svg"),
    // download clients
    ("qbittorrent", "/icons/qbittorrent.svg"),
    ("transmission", "/icons/transmission.svg"),
    ("deluge", "/icons/deluge.svg"),
    ("sabnzbd", "/icons/sabnzbd.svg"),
    ("nzbget", "/icons/nzbget.svg"),
    // storage & sync
    ("nextcloud", "/icons/nextcloud.svg"),
    ("seafile", "/icons/seafile.svg"),
    ("syncthing", "/icons/syncthing.svg"),
    ("filebrowser", "/icons/filebrowser.svg"),
    // networking
    ("pihole", "/icons/pihole.svg"),
    ("adguard", "/icons/adguard.svg"),
    ("wireguard", "/icons/wireguard.svg"),
    ("openvpn", "/icons/openvpn.svg"),
    ("nginx", "/icons/nginx.svg"),
    ("traefik", "/icons/traefik.svg"),
    ("caddy", "/icons/caddy.svg"),
    // monitoring
    ("grafana", "/icons/grafana.svg"),
    ("prometheus", "/icons/prometheus.svg"),
    ("uptime-kuma", "/icons/uptime-kuma.svg"),
    ("netdata", "/icons/netdata.svg"),
    ("glances", "/icons/glances.svg"),
    // containers
    ("portainer", "/icons/portainer.svg"),
    ("yacht", "/icons/yacht.svg"),
    ("dockge", "/icons/dockge.svg"),
    // home automation
    ("homeassistant", "/icons/homeassistant.svg"),
    ("nodered", "/icons/nodered.svg"),
    // password managers
    ("vaultwarden", "/icons/vaultwarden.svg"),
    ("bitwarden", "/icons/bitwarden.svg"),
    // dashboards
    ("heimdall", "/icons/heimdall.svg"),
    ("homer", "/icons/homer.svg"),
    ("homarr", "/icons/homarr.svg"),
    // communication
    ("matrix", "/icons/matrix.svg"),
    ("element", "/icons/element.svg"),
    // wiki / notes
    ("bookstack", "/icons/bookstack.svg"),
    ("wikijs", "/icons/wikijs.svg"),
    ("outline", "/icons/outline.svg"),
    ("default", DEFAULT_ICON_PATH),
];

/// Resolve an icon name to its asset path.
///
/// Names are lower-cased and stripped of whitespace before lookup, so
/// `"Home Assistant"` finds `homeassistant`. Unmapped names resolve to
/// [`DEFAULT_ICON_PATH`].
pub fn get_icon_path(name: &str) -> &'static str {
    let normalized: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    ICONS
        .iter()
        .find(|(key, _)| *key == normalized)
        .map(|(_, path)| *path)
        .unwrap_or(DEFAULT_ICON_PATH)
}

/// Every mapped icon name except the fallback
pub fn all_icons() -> Vec<&'static str> {
    ICONS
        .iter()
        .map(|(key, _)| *key)
        .filter(|key| *key != "default")
        .collect()
}
