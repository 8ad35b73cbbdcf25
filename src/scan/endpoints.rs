//! Endpoint extraction from controller sources.
//!
//! The scan reads a file top to bottom with three pieces of state: the
//! current class name, the current base path and whether the class is
//! network facing. A base path or class declaration only applies to the
//! handler lines below it; sources that declare them after their handlers
//! are misattributed. Handlers are never looked ahead for.

use super::patterns::{
    extract_literal, BASE_PATH_PREFIX, CLASS_DECLARATION, HANDLER_MAPPING, NETWORK_FACING_MARKER,
};
use super::ApiEndpoint;

/// Per-file scan state.
#[derive(Debug, Default)]
struct ScanState {
    type_name: String,
    base_path: String,
    network_facing: bool,
    endpoints: Vec<ApiEndpoint>,
}

impl ScanState {
    fn step(mut self, line: &str) -> Self {
        let line = line.trim();

        if line.contains(NETWORK_FACING_MARKER) {
            self.network_facing = true;
        }

        if line.starts_with(BASE_PATH_PREFIX) {
            self.base_path = extract_literal(line);
        }

        if let Some(caps) = CLASS_DECLARATION.captures(line) {
            self.type_name = caps[1].to_string();
        }

        if let Some(caps) = HANDLER_MAPPING.captures(line) {
            if self.network_facing {
                self.endpoints.push(ApiEndpoint {
                    http_method: caps[1].to_uppercase(),
                    path: normalize_path(&self.base_path, &extract_literal(line)),
                    controller_name: self.type_name.clone(),
                });
            }
        }

        self
    }
}

/// Endpoints declared in one source file.
pub fn scan_endpoints(text: &str) -> Vec<ApiEndpoint> {
    text.lines()
        .fold(ScanState::default(), ScanState::step)
        .endpoints
}

/// Join a base and sub path with one separator and collapse repeated ones.
///
/// `normalize_path("api/", "/users")` → `api/users`
pub fn normalize_path(base: &str, sub: &str) -> String {
    let joined = format!("{}/{}", base, sub);
    let mut out = String::with_capacity(joined.len());
    for c in joined.chars() {
        if c == '/' && out.ends_with('/') {
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("api/", "/users"), "api/users");
        assert_eq!(normalize_path("/api//", "//users"), "/api/users");
        assert_eq!(normalize_path("/api", "{id}"), "/api/{id}");
        assert_eq!(normalize_path("", "/health"), "/health");
        assert_eq!(normalize_path("/api/users", ""), "/api/users/");
    }

    #[test]
    fn test_scan_controller() {
        let source = r#"
@RestController
@RequestMapping("/api/users")
public class UserController {

    @GetMapping
    public List<User> all() { return service.all(); }

    @GetMapping("/{id}")
    public User one(@PathVariable Long id) { return service.find(id); }

    @PostMapping("/")
    public User create(@RequestBody User user) { return service.save(user); }

    @DeleteMapping(value = "/{id}")
    public void delete(@PathVariable Long id) { service.delete(id); }
}
"#;
        let endpoints = scan_endpoints(source);
        let got: Vec<_> = endpoints
            .iter()
            .map(|e| (e.http_method.as_str(), e.path.as_str(), e.controller_name.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("GET", "/api/users/{id}", "UserController"),
                ("POST", "/api/users/", "UserController"),
                ("DELETE", "/api/users/{id}", "UserController"),
            ]
        );
    }

    #[test]
    fn test_non_network_facing_class_has_no_endpoints() {
        let source = r#"
@Controller
public class PageController {
    @GetMapping("/home")
    public String home() { return "home"; }
}
"#;
        assert!(scan_endpoints(source).is_empty());
    }

    #[test]
    fn test_base_path_below_handlers_is_not_applied() {
        let source = r#"
@RestController
public class LateController {
    @PutMapping("/items")
    public void put() {}
}
@RequestMapping("/v2")
"#;
        let endpoints = scan_endpoints(source);
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].path, "/items");
    }

    #[test]
    fn test_handler_before_class_line_has_empty_controller() {
        let source = r#"
@RestController
@GetMapping("/early")
public class Odd {}
"#;
        let endpoints = scan_endpoints(source);
        assert_eq!(endpoints[0].controller_name, "");
        assert_eq!(endpoints[0].path, "/early");
    }
}
