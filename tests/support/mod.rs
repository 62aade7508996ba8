//! Shared fixtures for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn razorscope_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_razorscope"))
}

/// `"<kind>: <path>"`, with `path` written using `/` and rendered with native
/// separators the way the binary prints it.
#[allow(dead_code)]
pub fn line(kind: &str, path: &str) -> String {
    format!("{}: {}", kind, native_path(path).display())
}

#[allow(dead_code)]
pub fn native_path(path: &str) -> PathBuf {
    path.split('/').collect()
}

#[allow(dead_code)]
/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(&path, content).expect("Failed to write fixture file");
}

#[allow(dead_code)]
/// A minimal SDK-style project file with the given `PropertyGroup` body.
pub fn project_file(properties: &str) -> String {
    format!(
        r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
{}
  </PropertyGroup>
</Project>
"#,
        properties
    )
}

/// MVC project with two views, some code and stale build output.
#[allow(dead_code)]
pub fn simple_mvc() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    write_file(
        root,
        "SimpleMvc.csproj",
        &project_file("    <TargetFramework>net5.0</TargetFramework>"),
    );
    write_file(root, "Controllers/HomeController.cs", "public class HomeController {}");
    write_file(root, "Views/Home/Index.cshtml", "<h1>Home</h1>");
    write_file(root, "Views/_ViewStart.cshtml", "@{ Layout = \"_Layout\"; }");
    write_file(root, "wwwroot/css/site.css", "body {}");
    write_file(root, "bin/Debug/net5.0/Views/Copied.cshtml", "");
    write_file(root, "obj/Debug/net5.0/Razor/Generated.cshtml", "");

    dir
}

/// Component project with scoped stylesheets next to two of its components.
#[allow(dead_code)]
pub fn component_app() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path();

    write_file(
        root,
        "ComponentApp.csproj",
        &project_file("    <TargetFramework>net5.0</TargetFramework>"),
    );
    write_file(root, "App.razor", "<Router />");
    write_file(root, "Pages/Index.razor", "@page \"/\"");
    write_file(root, "Pages/Index.razor.css", "h1 { color: red; }");
    write_file(root, "Program.cs", "class Program {}");
    write_file(root, "Shared/MainLayout.razor", "@Body");
    write_file(root, "Shared/MainLayout.razor.css", ".page {}");

    dir
}
