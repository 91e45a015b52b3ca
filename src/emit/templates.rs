//! Tera templates for the generated Gradle files.

pub const SETTINGS_TEMPLATE_NAME: &str = "settings.gradle.kts";
pub const BUILD_TEMPLATE_NAME: &str = "build.gradle.kts";

pub const SETTINGS_TEMPLATE: &str = r#"rootProject.name = "{{ root_name }}"

dependencyResolutionManagement {
    repositories {
        // plain mavenLocal() ignores artifacts without maven-metadata-local.xml
        mavenLocal {
            metadataSources {
                mavenPom()
                artifact()
            }
        }
{%- for mirror in mirrors %}
        maven {
            name = "{{ mirror.id }}"
            url = uri("{{ mirror.url }}")
        }
{%- endfor %}
        mavenCentral()
    }
}
{% for path in includes %}
include(":{{ path }}")
{%- endfor %}
"#;

pub const BUILD_TEMPLATE: &str = r#"{% for var in variables %}val {{ var.name }} = "{{ var.value }}"
{% endfor %}{% if variables %}
{% endif %}plugins {
    id("java")
    id("java-library")
{%- for plugin in plugins %}
    id("{{ plugin.id }}"){% if plugin.version %} version "{{ plugin.version }}"{% endif %}
{%- endfor %}
}

java {
    sourceCompatibility = JavaVersion.toVersion("{{ java_version }}")
    targetCompatibility = JavaVersion.toVersion("{{ java_version }}")
}

group = "{{ group }}"
version = "{{ version }}"
layout.buildDirectory.set(file("$projectDir/target/gradle"))

tasks.withType<JavaCompile> {
    options.encoding = "UTF-8"
}

dependencies {
{%- for line in dependencies %}
    {{ line }}
{%- endfor %}
}

// Force the declared versions; Maven resolves nearest-wins, Gradle picks the highest
val forcedDeps = configurations
    .flatMap { it.dependencies }
    .filter { it.version != null }
    .map { "${it.group}:${it.name}:${it.version}" }
    .distinct()
configurations.all {
    resolutionStrategy {
        force(forcedDeps)
    }
}
{% for fragment in fragments %}
// begin {{ fragment.name }} ({{ fragment.maven_key }})
{{ fragment.body }}
// end {{ fragment.name }}
{% endfor %}
{%- if excludes %}
tasks.withType<JavaCompile> {
{%- for exclude in excludes %}
    exclude("{{ exclude }}")
{%- endfor %}
}
{% endif -%}
"#;
