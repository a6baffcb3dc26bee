use std::process::Command;

fn main() {
    // 将当前 git 提交号注入 PACKCAST_GIT_HASH，供宿主环境描述符上报。
    // 非 git 环境（如发布 tarball 构建）下保持缺省。
    let hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string());

    if let Some(hash) = hash {
        println!("cargo:rustc-env=PACKCAST_GIT_HASH={}", hash);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
}
